// ExpressionUtils - Rust client for the KBase ExpressionUtils service
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Data types exchanged with the ExpressionUtils service.
//!
//! Each type mirrors one record of the service's JSON schema. Every declared
//! field is optional and is left out of the serialized JSON when unset. Keys
//! the schema does not declare are kept in an `additional_properties` bag so a
//! response can be decoded and re-encoded without losing anything.
//!
//! Fields are public; the generated `with_*` methods allow building values in
//! a single expression:
//!
//! ```rust
//! use expression_utils_client::types::{AdditionalProperties, ExportParams};
//!
//! let params = ExportParams::default()
//!     .with_source_ref("my_workspace/my_expression")
//!     .with_additional_property("note", "kept verbatim");
//! assert_eq!(params.source_ref.as_deref(), Some("my_workspace/my_expression"));
//! ```

use serde_json::{Map, Value};

/// Open map of JSON members not declared by a type's schema.
pub type PropertyMap = Map<String, Value>;

/// Access to the extensibility bag carried by every data type.
pub trait AdditionalProperties {
    /// Undeclared JSON members captured during deserialization.
    fn additional_properties(&self) -> &PropertyMap;

    /// Mutable access to the undeclared members.
    fn additional_properties_mut(&mut self) -> &mut PropertyMap;

    /// Inserts an undeclared member, replacing any previous value.
    fn set_additional_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.additional_properties_mut().insert(name.into(), value.into());
    }

    /// Builder form of [`AdditionalProperties::set_additional_property`].
    fn with_additional_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self
    where
        Self: Sized,
    {
        self.set_additional_property(name, value);
        self
    }
}

/// Generates `with_<field>` builders and the [`AdditionalProperties`] impl for a type.
macro_rules! impl_dto {
    ($ty:ident { $($field:ident: $fty:ty),* $(,)? }) => {
        paste::paste! {
            impl $ty {
                $(
                    #[doc = concat!(
                        "Sets `", stringify!($field), "` and returns the updated value."
                    )]
                    pub fn [<with_ $field>](mut self, value: impl Into<$fty>) -> Self {
                        self.$field = Some(value.into());
                        self
                    }
                )*
            }
        }

        impl $crate::types::AdditionalProperties for $ty {
            fn additional_properties(&self) -> &$crate::types::PropertyMap {
                &self.additional_properties
            }

            fn additional_properties_mut(&mut self) -> &mut $crate::types::PropertyMap {
                &mut self.additional_properties
            }
        }
    };
}

mod download;
mod feature_values;
mod matrix;
mod upload;

pub use download::*;
pub use feature_values::*;
pub use matrix::*;
pub use upload::*;

/// Result of the `status` call: a free-form map of service health fields
/// (`state`, `message`, `version`, `git_url`, `git_commit_hash`, ...).
pub type ServiceStatus = PropertyMap;
