use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for asset, page and phase identifiers.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Counter feeding generated ids. Shared by every id type so that a
/// generated string is never handed out twice.
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Produce a `{prefix}_{n}` string that has never been interned before.
///
/// Ids that arrived through an import are already in the interner, so a
/// collision with them is skipped rather than reused.
fn fresh(prefix: &str) -> Spur {
    loop {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let candidate = format!("{prefix}_{n}");
        if !INTERNER.contains(&candidate) {
            return INTERNER.get_or_intern(candidate);
        }
    }
}

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident, $sigil:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Spur);

        impl $name {
            /// Intern a string as an id, or return the existing one.
            pub fn intern(s: &str) -> Self {
                Self(INTERNER.get_or_intern(s))
            }

            /// Resolve back to a string slice.
            pub fn as_str(&self) -> &str {
                INTERNER.resolve(&self.0)
            }

            /// Generate a never-before-seen id with a prefix (e.g. `text_4`).
            pub fn with_prefix(prefix: &str) -> Self {
                Self(fresh(prefix))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($sigil, "{}"), self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::intern(&s))
            }
        }
    };
}

interned_id!(
    /// Identity of a placed asset. Stable for the asset's lifetime.
    AssetId,
    "@"
);

interned_id!(
    /// Identity of a page (slide step or reading-material page).
    PageId,
    "#"
);

interned_id!(
    /// Key of a lesson phase; each phase holds an ordered list of pages.
    PhaseKey,
    "%"
);

impl AssetId {
    /// Generate a fresh id for an asset without a more specific prefix.
    pub fn anonymous() -> Self {
        Self::with_prefix("asset")
    }
}

impl PageId {
    /// Generate a fresh page id.
    pub fn fresh() -> Self {
        Self::with_prefix("page")
    }
}
