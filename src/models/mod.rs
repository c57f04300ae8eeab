pub mod enriched;
pub mod observation;
pub mod summary;

pub use enriched::{
    ClimateZone, ComfortLevel, EnrichedObservation, Hemisphere, HumidityCategory, Season,
    SeverityLevel, TemperatureCategory,
};
pub use observation::{QualityFlag, RawObservation};
pub use summary::{ComfortCategory, DailySummary, TemperatureStability};

/// Closed categorical dimension serialized as the warehouse's
/// SCREAMING_SNAKE_CASE column values, with infallible string round-tripping.
macro_rules! closed_category {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use closed_category;
