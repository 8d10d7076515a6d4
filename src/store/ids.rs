use rand::{Rng, distr::Alphanumeric};

use crate::foundation::error::{HeliographError, HeliographResult};

/// Shape of a generated identifier: fixed prefix followed by `len` alphanumeric characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdSpec {
    /// Literal prefix, e.g. `"hg_"`.
    pub prefix: &'static str,
    /// Number of random characters after the prefix.
    pub len: usize,
}

/// Heliogram ids: `hg_` + 12.
pub const HELIOGRAM_ID: IdSpec = IdSpec {
    prefix: "hg_",
    len: 12,
};

/// Response ids: `resp_` + 12.
pub const RESPONSE_ID: IdSpec = IdSpec {
    prefix: "resp_",
    len: 12,
};

/// Question ids: `q_` + 8.
pub const QUESTION_ID: IdSpec = IdSpec {
    prefix: "q_",
    len: 8,
};

impl IdSpec {
    /// Custom spec; `len` must be > 0.
    pub fn new(prefix: &'static str, len: usize) -> HeliographResult<Self> {
        if len == 0 {
            return Err(HeliographError::validation("IdSpec len must be > 0"));
        }
        Ok(Self { prefix, len })
    }

    /// `true` when `id` is `prefix` followed by exactly `len` ASCII alphanumerics.
    pub fn matches(&self, id: &str) -> bool {
        id.strip_prefix(self.prefix).is_some_and(|rest| {
            rest.len() == self.len && rest.bytes().all(|b| b.is_ascii_alphanumeric())
        })
    }
}

/// Generate an id for `spec` from the thread-local RNG.
///
/// Characters are drawn uniformly, with replacement, from `[A-Za-z0-9]`. Ids are not checked
/// against any existing collection.
pub fn generate_id(spec: IdSpec) -> String {
    generate_id_with(spec, &mut rand::rng())
}

/// [`generate_id`] with a caller-supplied RNG.
pub fn generate_id_with<R: Rng>(spec: IdSpec, rng: &mut R) -> String {
    let mut id = String::with_capacity(spec.prefix.len() + spec.len);
    id.push_str(spec.prefix);
    id.extend((0..spec.len).map(|_| char::from(rng.sample(Alphanumeric))));
    id
}

#[cfg(test)]
#[path = "../../tests/unit/store/ids.rs"]
mod tests;
