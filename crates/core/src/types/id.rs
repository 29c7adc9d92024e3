//! Newtype ID for type-safe scenario references.
//!
//! Scenario identifiers are store-assigned UUIDs. They travel as plain
//! strings on the wire and as native `uuid` values inside the service,
//! so the wrapper owns the translation in both directions.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A type-safe scenario identifier.
///
/// Wraps a [`Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]` (UUID string on the wire)
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_uuid()`
/// - `FromStr` for parsing path identifiers
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```
/// use planwise_core::ScenarioId;
///
/// let id: ScenarioId = "67f1c7f0-8c4e-4a7e-9d3a-2b1f0c9d8e7a".parse().unwrap();
/// assert_eq!(id.to_string(), "67f1c7f0-8c4e-4a7e-9d3a-2b1f0c9d8e7a");
///
/// // Malformed identifiers do not parse
/// assert!("not-a-scenario-id".parse::<ScenarioId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(Uuid);

impl ScenarioId {
    /// Create a new ID from a `Uuid` value.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Create a new random (v4) ID.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying `Uuid` value.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ScenarioId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ScenarioId> for Uuid {
    fn from(id: ScenarioId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ScenarioId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Uuid as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ScenarioId {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <Uuid as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ScenarioId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Uuid as sqlx::Encode<'_, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
