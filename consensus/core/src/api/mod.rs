use crate::header::HeaderRef;
use crate::Hash;
use std::collections::HashMap;
use std::sync::Arc;

/// Read access to validated headers, provided by the chain store.
///
/// Returning `None` is not a storage failure: it means the header is not
/// known locally, which difficulty validation reports as a chain that is
/// too short. Implementations must be safe for concurrent reads if the
/// validator is shared between threads.
pub trait HeaderLookup {
    fn get_header(&self, hash: &Hash) -> Option<HeaderRef>;
}

impl<L: HeaderLookup + ?Sized> HeaderLookup for &L {
    fn get_header(&self, hash: &Hash) -> Option<HeaderRef> {
        (**self).get_header(hash)
    }
}

impl<L: HeaderLookup + ?Sized> HeaderLookup for Arc<L> {
    fn get_header(&self, hash: &Hash) -> Option<HeaderRef> {
        (**self).get_header(hash)
    }
}

impl HeaderLookup for HashMap<Hash, HeaderRef> {
    fn get_header(&self, hash: &Hash) -> Option<HeaderRef> {
        self.get(hash).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashmap_lookup_returns_none_for_unknown() {
        let header = HeaderRef::genesis(0, 0x207fffff, Hash::from_u64_word(1));
        let mut map = HashMap::new();
        map.insert(header.hash, header);

        assert_eq!(map.get_header(&header.hash), Some(header));
        assert_eq!(map.get_header(&Hash::from_u64_word(2)), None);

        let shared = Arc::new(map);
        assert_eq!(shared.get_header(&header.hash), Some(header));
    }
}
