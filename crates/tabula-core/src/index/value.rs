use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A column value that can key a sorted index
pub trait IndexValue: Copy {
    /// Totally ordered form of the value
    type Key: Ord + Copy + fmt::Debug;

    /// Convert to the ordered key
    fn to_key(self) -> Self::Key;
}

macro_rules! identity_index_value {
    ($($ty:ty),*) => {
        $(
            impl IndexValue for $ty {
                type Key = $ty;

                fn to_key(self) -> $ty {
                    self
                }
            }
        )*
    };
}

identity_index_value!(i8, i16, i32, i64);

macro_rules! total_float {
    ($name:ident, $float:ty, $bits:ty) => {
        /// Float wrapper with a total order
        ///
        /// `-0.0` equals `0.0`, every NaN equals every other NaN, and NaN
        /// sorts above positive infinity.
        #[derive(Clone, Copy)]
        pub struct $name($float);

        impl $name {
            /// Wrap `value`, collapsing signed zeros and NaN payloads
            pub fn new(value: $float) -> Self {
                if value.is_nan() {
                    Self(<$float>::NAN)
                } else if value == 0.0 {
                    Self(0.0)
                } else {
                    Self(value)
                }
            }

            /// Wrapped value
            pub fn get(self) -> $float {
                self.0
            }

            fn bits(self) -> $bits {
                self.0.to_bits()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.bits() == other.bits()
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.bits().hash(state);
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self.0, f)
            }
        }

        impl From<$float> for $name {
            fn from(value: $float) -> Self {
                Self::new(value)
            }
        }

        impl IndexValue for $float {
            type Key = $name;

            fn to_key(self) -> $name {
                $name::new(self)
            }
        }
    };
}

total_float!(TotalF32, f32, u32);
total_float!(TotalF64, f64, u64);
