pub(crate) mod culler;
