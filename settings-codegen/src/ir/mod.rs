//! Settings schema intermediate representation.

pub mod hash;
pub mod schema;

pub use schema::{
    DefaultValue, EnumDef, EnumValue, Platform, ScalarType, SettingEntry, SettingGroup,
    SettingNode, SettingScope, SettingType, SettingsSchema,
};
