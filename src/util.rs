pub(crate) mod uri;
