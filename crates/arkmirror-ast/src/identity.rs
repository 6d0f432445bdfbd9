//! Identity equality used by the node factory
//!
//! `is_same` is the only criterion `update` uses to decide whether a node
//! can be reused: nodes compare by handle, scalars by value, sequences by
//! length and element-wise identity.

use arkmirror_native::RawHandle;
use arkmirror_types::{
    MemberExpressionKind, MethodDefinitionKind, ModifierFlags, PrimitiveType,
    ScriptFunctionFlags, TokenType, VariableDeclarationKind,
};

pub trait IsSame {
    fn is_same(&self, other: &Self) -> bool;
}

/// Free-function form, convenient in iterator chains
pub fn is_same<T: IsSame + ?Sized>(a: &T, b: &T) -> bool {
    a.is_same(b)
}

macro_rules! value_identity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IsSame for $ty {
                fn is_same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

value_identity!(
    bool,
    u32,
    i64,
    str,
    String,
    RawHandle,
    MemberExpressionKind,
    MethodDefinitionKind,
    VariableDeclarationKind,
    TokenType,
    PrimitiveType,
    ScriptFunctionFlags,
    ModifierFlags,
);

impl IsSame for f64 {
    // Bitwise, so that NaN literals are identical to themselves
    fn is_same(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl<T: IsSame> IsSame for Option<T> {
    fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.is_same(b),
            _ => false,
        }
    }
}

impl<T: IsSame> IsSame for [T] {
    fn is_same(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.is_same(b))
    }
}

impl<T: IsSame> IsSame for Vec<T> {
    fn is_same(&self, other: &Self) -> bool {
        self.as_slice().is_same(other.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert!(true.is_same(&true));
        assert!(!"a".is_same("b"));
        assert!(f64::NAN.is_same(&f64::NAN));
        assert!(!0.0f64.is_same(&-0.0f64));
        assert!(TokenType::Plus.is_same(&TokenType::Plus));
    }

    #[test]
    fn test_sequences() {
        assert!(vec![1u32, 2, 3].is_same(&vec![1, 2, 3]));
        assert!(!vec![1u32, 2].is_same(&vec![1, 2, 3]));
        assert!(!vec![1u32, 2, 3].is_same(&vec![1, 3, 2]));
        let empty: Vec<u32> = Vec::new();
        assert!(empty.is_same(&Vec::new()));
    }

    #[test]
    fn test_optionals() {
        assert!(None::<bool>.is_same(&None));
        assert!(!Some(true).is_same(&None));
        assert!(Some(String::from("x")).is_same(&Some(String::from("x"))));
        assert!(is_same(&Some(1u32), &Some(1u32)));
    }
}
