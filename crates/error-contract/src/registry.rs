// crates/error-contract/src/registry.rs
// ============================================================================
// Module: Error Code Registry
// Description: Offset ranges, enumeration traits, and code-to-Error mapping.
// Purpose: Give every declared enumerant a unique code and a resolved Error.
// Dependencies: crate::{codes, error, lookup, resolver}
// ============================================================================

//! ## Overview
//! Each module owns a [`ErrorOffset`] range of [`ErrorOffset::RANGE_SIZE`]
//! codes. An enumerant's code is its module offset plus its ordinal, and its
//! catalog key is `ERROR_<PREFIX>_<VARIANT>` with the variant name upper-cased.
//!
//! Enumerations are declared with [`crate::error_codes!`], which also checks at
//! build time that every ordinal fits in the module range. Ordinals may leave
//! gaps for future insertion.
//!
//! [`ErrorRegistry`] binds one catalog per offset and resolves enumerants into
//! [`Error`] values through a [`DescriptionResolver`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::codes::CONTRACT_CATALOG;
use crate::codes::CORE_CATALOG;
use crate::error::Error;
use crate::lookup::ResourceLookup;
use crate::resolver::DescriptionResolver;

// ============================================================================
// SECTION: Offsets
// ============================================================================

/// Base of a module's error code range.
///
/// # Invariants
/// - The base is a multiple of [`ErrorOffset::RANGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorOffset(u32);

impl ErrorOffset {
    /// Number of codes reserved for each module.
    pub const RANGE_SIZE: u32 = 0x100;
    /// Core errors (`0x000 - 0x0FF`).
    pub const CORE: Self = Self(0x000);
    /// Contract errors (`0x100 - 0x1FF`).
    pub const CONTRACT: Self = Self(0x100);

    /// Returns the offset of the `index`-th module range.
    #[must_use]
    #[allow(clippy::cast_lossless, reason = "u32::from is not const.")]
    pub const fn module(index: u16) -> Self {
        Self(index as u32 * Self::RANGE_SIZE)
    }

    /// Returns the offset of the range containing `code`.
    #[must_use]
    pub const fn of_code(code: u32) -> Self {
        Self(code - code % Self::RANGE_SIZE)
    }

    /// Returns the first code of the range.
    #[must_use]
    pub const fn base(self) -> u32 {
        self.0
    }

    /// Returns true when `code` lies in this range.
    #[must_use]
    pub const fn contains(self, code: u32) -> bool {
        code >= self.0 && code - self.0 < Self::RANGE_SIZE
    }

    /// Returns the code for an ordinal within this range.
    #[must_use]
    pub const fn code(self, ordinal: u32) -> u32 {
        self.0.saturating_add(ordinal)
    }
}

impl fmt::Display for ErrorOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:03X}", self.0)
    }
}

// ============================================================================
// SECTION: Enumeration Traits
// ============================================================================

/// Closed enumeration whose members can be checked from raw numeric values.
///
/// Implemented by [`crate::contract_enum!`] and [`crate::error_codes!`].
pub trait ContractEnum: Copy + Eq + 'static {
    /// Enumeration name used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Returns every declared member in declaration order.
    fn variants() -> &'static [Self];

    /// Returns the member's numeric value.
    fn value(self) -> i64;

    /// Returns the member's declared name.
    fn variant_name(self) -> &'static str;

    /// Returns the member declared with `value`, if any.
    fn from_value(value: i64) -> Option<Self> {
        Self::variants().iter().copied().find(|member| member.value() == value)
    }
}

/// Error enumeration bound to a module range and catalog prefix.
pub trait ErrorCodeSet: ContractEnum {
    /// Module range.
    const OFFSET: ErrorOffset;
    /// Catalog key prefix (for example `CONTRACT`).
    const PREFIX: &'static str;

    /// Returns the member's ordinal within the module range.
    fn ordinal(self) -> u32;

    /// Returns the globally unique code.
    fn code(self) -> u32 {
        Self::OFFSET.code(self.ordinal())
    }

    /// Returns the catalog key, `ERROR_<PREFIX>_<VARIANT>`.
    fn key(self) -> String {
        format!("ERROR_{}_{}", Self::PREFIX, self.variant_name().to_uppercase())
    }
}

// ============================================================================
// SECTION: Declaration Macros
// ============================================================================

/// Declares a fieldless enumeration implementing [`ContractEnum`].
///
/// The enumeration derives `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`,
/// `Hash`, `PartialOrd` and `Ord`.
///
/// ```ignore
/// contract_enum! {
///     /// Payment state.
///     pub enum PaymentState: u8 {
///         /// Not yet sent.
///         Pending = 1,
///         /// Settled.
///         Settled = 4,
///     }
/// }
/// ```
#[macro_export]
macro_rules! contract_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $( $(#[$vmeta:meta])* $variant:ident $(= $value:expr)? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr($repr)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant $(= $value)? ),+
        }

        impl $crate::registry::ContractEnum for $name {
            const TYPE_NAME: &'static str = ::core::stringify!($name);

            fn variants() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            #[allow(
                clippy::cast_lossless,
                clippy::cast_possible_wrap,
                clippy::unnecessary_cast,
                reason = "Discriminants are compared as i64 across representations."
            )]
            fn value(self) -> i64 {
                self as $repr as i64
            }

            fn variant_name(self) -> &'static str {
                match self {
                    $(Self::$variant => ::core::stringify!($variant),)+
                }
            }
        }
    };
}

/// Declares an error enumeration bound to a module range and catalog prefix.
///
/// Fails the build when an ordinal does not fit in the module range.
///
/// ```ignore
/// error_codes! {
///     /// Payroll errors.
///     pub enum PayrollError in ErrorOffset::module(2), prefix "PAYROLL" {
///         /// Unknown payroll error.
///         Unknown = 0,
///         /// Missing employee.
///         MissingEmployee,
///     }
/// }
/// ```
#[macro_export]
macro_rules! error_codes {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $offset:expr, prefix $prefix:literal {
            $( $(#[$vmeta:meta])* $variant:ident $(= $value:expr)? ),+ $(,)?
        }
    ) => {
        $crate::contract_enum! {
            $(#[$meta])*
            $vis enum $name: u32 {
                $( $(#[$vmeta])* $variant $(= $value)? ),+
            }
        }

        impl $crate::registry::ErrorCodeSet for $name {
            const OFFSET: $crate::registry::ErrorOffset = $offset;
            const PREFIX: &'static str = $prefix;

            fn ordinal(self) -> u32 {
                self as u32
            }
        }

        const _: () = {
            $(
                ::core::assert!(
                    ($name::$variant as u32) < $crate::registry::ErrorOffset::RANGE_SIZE,
                    ::core::concat!(
                        "error ordinal exceeds module range: ",
                        ::core::stringify!($name),
                        "::",
                        ::core::stringify!($variant)
                    )
                );
            )+
        };
    };
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Maps error enumerants to resolved [`Error`] values.
#[derive(Clone)]
pub struct ErrorRegistry {
    /// Resolver used for every lookup.
    resolver: DescriptionResolver,
    /// Catalog bound to each module range.
    catalogs: BTreeMap<ErrorOffset, Arc<dyn ResourceLookup>>,
}

impl ErrorRegistry {
    /// Creates a registry with no catalogs bound.
    #[must_use]
    pub const fn new(resolver: DescriptionResolver) -> Self {
        Self {
            resolver,
            catalogs: BTreeMap::new(),
        }
    }

    /// Creates a registry with the core and contract catalogs bound.
    #[must_use]
    pub fn with_builtin_catalogs(resolver: DescriptionResolver) -> Self {
        Self::new(resolver)
            .with_catalog(ErrorOffset::CORE, Arc::new(CORE_CATALOG))
            .with_catalog(ErrorOffset::CONTRACT, Arc::new(CONTRACT_CATALOG))
    }

    /// Binds `catalog` to `offset`, returning the catalog it replaces.
    pub fn register(
        &mut self,
        offset: ErrorOffset,
        catalog: Arc<dyn ResourceLookup>,
    ) -> Option<Arc<dyn ResourceLookup>> {
        self.catalogs.insert(offset, catalog)
    }

    /// Binds `catalog` to `offset`.
    #[must_use]
    pub fn with_catalog(mut self, offset: ErrorOffset, catalog: Arc<dyn ResourceLookup>) -> Self {
        self.register(offset, catalog);
        self
    }

    /// Returns the catalog bound to `offset`.
    #[must_use]
    pub fn catalog(&self, offset: ErrorOffset) -> Option<&dyn ResourceLookup> {
        self.catalogs.get(&offset).map(|catalog| catalog.as_ref())
    }

    /// Returns the resolver.
    #[must_use]
    pub const fn resolver(&self) -> &DescriptionResolver {
        &self.resolver
    }

    /// Resolves `code` into an [`Error`], interpolating `args` into its template.
    #[must_use]
    pub fn to_error<C: ErrorCodeSet>(&self, code: C, args: &[String]) -> Error {
        let key = code.key();
        self.resolver.resolve(code.code(), Some(&key), self.catalog(C::OFFSET), args)
    }
}

impl Default for ErrorRegistry {
    fn default() -> Self {
        Self::with_builtin_catalogs(DescriptionResolver::new())
    }
}
