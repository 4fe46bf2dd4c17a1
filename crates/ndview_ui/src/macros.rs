//! Macros for reducing boilerplate in control implementations.

/// Generates a builder-style setter method for a field.
///
/// # Usage
///
/// ```ignore
/// builder_field!(label, String);
/// // Generates: pub fn label(mut self, value: String) -> Self { self.label = value; self }
/// ```
#[macro_export]
macro_rules! builder_field {
    ($name:ident, $type:ty) => {
        pub fn $name(mut self, value: $type) -> Self {
            self.$name = value;
            self
        }
    };
    ($method:ident, $field:ident, $type:ty) => {
        pub fn $method(mut self, value: $type) -> Self {
            self.$field = value;
            self
        }
    };
}

/// Generates a callback setter method for controls.
///
/// The enclosing type must be generic over a parameter named `Message` and
/// store the callback as a [`Callback`](crate::Callback) field of the same name.
///
/// # Usage
///
/// ```ignore
/// callback_setter!(on_change, usize);
/// // Generates: pub fn on_change<F>(mut self, f: F) -> Self where F: Fn(usize) -> Message + 'static
/// ```
#[macro_export]
macro_rules! callback_setter {
    ($name:ident, $param:ty) => {
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn($param) -> Message + 'static,
        {
            self.$name = $crate::Callback::new(f);
            self
        }
    };
}
