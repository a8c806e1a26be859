//! Heterogeneous field lists
//!
//! A record builder accumulates its fields in a tuple, one element per
//! field. `Append` grows the tuple by one element and `FieldList` combines a
//! non-empty tuple of fields into codec and schema halves. Both are
//! implemented for every supported arity by the macros below, so appending a
//! seventeenth field or finalizing an empty builder does not compile.

use serde_json::{Map, Value};

use super::field::{Field, FieldInfo};
use crate::codec::DecodeResult;

/// Appends one element to the end of a tuple
pub trait Append<E> {
    type Output;

    fn append(self, element: E) -> Self::Output;
}

macro_rules! impl_append {
    ($($A:ident),*) => {
        impl<$($A,)* E> Append<E> for ($($A,)*) {
            type Output = ($($A,)* E,);

            #[allow(non_snake_case, clippy::unused_unit)]
            fn append(self, element: E) -> Self::Output {
                let ($($A,)*) = self;
                ($($A,)* element,)
            }
        }
    };
}

impl_append!();
impl_append!(A0);
impl_append!(A0, A1);
impl_append!(A0, A1, A2);
impl_append!(A0, A1, A2, A3);
impl_append!(A0, A1, A2, A3, A4);
impl_append!(A0, A1, A2, A3, A4, A5);
impl_append!(A0, A1, A2, A3, A4, A5, A6);
impl_append!(A0, A1, A2, A3, A4, A5, A6, A7);
impl_append!(A0, A1, A2, A3, A4, A5, A6, A7, A8);
impl_append!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9);
impl_append!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10);
impl_append!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11);
impl_append!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12);
impl_append!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13);
impl_append!(A0, A1, A2, A3, A4, A5, A6, A7, A8, A9, A10, A11, A12, A13, A14);

/// Ordered, non-empty list of fields of a record of type `T`
pub trait FieldList<T>: Send + Sync + 'static {
    /// Tuple of decoded field values, in declaration order
    type Values;

    fn infos(&self) -> Vec<FieldInfo<'_>>;

    /// Reads every field; the first failure aborts
    fn read(&self, object: &Map<String, Value>) -> DecodeResult<Self::Values>;

    fn write(&self, value: &T, object: &mut Map<String, Value>);
}

macro_rules! impl_field_list {
    ($($idx:tt => $A:ident),+) => {
        impl<T: 'static, $($A: 'static),+> FieldList<T> for ($(Field<T, $A>,)+) {
            type Values = ($($A,)+);

            fn infos(&self) -> Vec<FieldInfo<'_>> {
                vec![$(self.$idx.info()),+]
            }

            fn read(&self, object: &Map<String, Value>) -> DecodeResult<Self::Values> {
                Ok(($(self.$idx.read(object)?,)+))
            }

            fn write(&self, value: &T, object: &mut Map<String, Value>) {
                $(self.$idx.write(value, object);)+
            }
        }
    };
}

impl_field_list!(0 => A0);
impl_field_list!(0 => A0, 1 => A1);
impl_field_list!(0 => A0, 1 => A1, 2 => A2);
impl_field_list!(0 => A0, 1 => A1, 2 => A2, 3 => A3);
impl_field_list!(0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4);
impl_field_list!(0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5);
impl_field_list!(0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5, 6 => A6);
impl_field_list!(0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5, 6 => A6, 7 => A7);
impl_field_list!(
    0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5, 6 => A6, 7 => A7, 8 => A8
);
impl_field_list!(
    0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5, 6 => A6, 7 => A7, 8 => A8,
    9 => A9
);
impl_field_list!(
    0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5, 6 => A6, 7 => A7, 8 => A8,
    9 => A9, 10 => A10
);
impl_field_list!(
    0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5, 6 => A6, 7 => A7, 8 => A8,
    9 => A9, 10 => A10, 11 => A11
);
impl_field_list!(
    0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5, 6 => A6, 7 => A7, 8 => A8,
    9 => A9, 10 => A10, 11 => A11, 12 => A12
);
impl_field_list!(
    0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5, 6 => A6, 7 => A7, 8 => A8,
    9 => A9, 10 => A10, 11 => A11, 12 => A12, 13 => A13
);
impl_field_list!(
    0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5, 6 => A6, 7 => A7, 8 => A8,
    9 => A9, 10 => A10, 11 => A11, 12 => A12, 13 => A13, 14 => A14
);
impl_field_list!(
    0 => A0, 1 => A1, 2 => A2, 3 => A3, 4 => A4, 5 => A5, 6 => A6, 7 => A7, 8 => A8,
    9 => A9, 10 => A10, 11 => A11, 12 => A12, 13 => A13, 14 => A14, 15 => A15
);
