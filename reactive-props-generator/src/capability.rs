//! The notification capability generated accessors depend on.
//!
//! The names below are fixed: the marker that opts a field in, the interface
//! an enclosing type must implement, and the compare-and-set operation every
//! generated setter delegates to.
//!
//! [`ReactiveObject`] and [`raise_and_set_if_changed`] describe the contract
//! of that operation: assign and notify only when the value differs. The
//! generated setter never compares values itself.

/// Marker attribute that opts a backing field into accessor generation.
pub const MARKER_ATTRIBUTE: &str = "global::ReactiveProps.ReactiveProperty";

/// Interface an enclosing type must implement, directly or transitively.
pub const CAPABILITY_INTERFACE: &str = "global::ReactiveUI.IReactiveObject";

/// Compare-and-set-with-notification operation called by generated setters.
pub const SET_AND_RAISE_OPERATION: &str =
    "global::ReactiveUI.IReactiveObjectExtensions.RaiseAndSetIfChanged";

/// An object that announces changes of its tracked values.
pub trait ReactiveObject {
    /// Called before a tracked value changes.
    fn raise_property_changing(&mut self, property: &str);

    /// Called after a tracked value changed.
    fn raise_property_changed(&mut self, property: &str);
}

/// Assign `value` to the slot selected by `field` and notify, unless the slot
/// already holds an equal value.
///
/// Returns whether the value changed.
pub fn raise_and_set_if_changed<O, T, F>(
    object: &mut O,
    field: F,
    value: T,
    property: &str,
) -> bool
where
    O: ReactiveObject + ?Sized,
    T: PartialEq,
    F: Fn(&mut O) -> &mut T,
{
    if *field(object) == value {
        return false;
    }

    object.raise_property_changing(property);
    *field(object) = value;
    object.raise_property_changed(property);
    true
}
