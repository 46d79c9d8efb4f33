pub(crate) mod percent;
pub(crate) mod utf8;
