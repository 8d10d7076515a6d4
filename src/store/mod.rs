pub(crate) mod ids;
pub(crate) mod local;
pub(crate) mod storage;
