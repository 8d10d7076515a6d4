pub(crate) mod host;
pub(crate) mod observer;
pub(crate) mod progress;
