pub(crate) mod ease;
pub(crate) mod faces;
pub(crate) mod interp;
pub(crate) mod timeline;
