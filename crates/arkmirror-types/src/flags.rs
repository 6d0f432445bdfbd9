//! Bit-flag sets stored on native nodes

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flags describing the shape of a script function
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ScriptFunctionFlags: u32 {
        const NONE = 0;
        const ARROW = 1 << 0;
        const METHOD = 1 << 1;
        const CONSTRUCTOR = 1 << 2;
        const GETTER = 1 << 3;
        const SETTER = 1 << 4;
        const ASYNC = 1 << 5;
        const GENERATOR = 1 << 6;
        const OVERLOAD = 1 << 7;
    }
}

bitflags! {
    /// Declaration modifiers (`static`, `export`, access level, ...)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ModifierFlags: u32 {
        const NONE = 0;
        const STATIC = 1 << 0;
        const ASYNC = 1 << 1;
        const PUBLIC = 1 << 2;
        const PROTECTED = 1 << 3;
        const PRIVATE = 1 << 4;
        const DECLARE = 1 << 5;
        const READONLY = 1 << 6;
        const ABSTRACT = 1 << 7;
        const EXPORT = 1 << 8;
        const DEFAULT_EXPORT = 1 << 9;
        const OVERRIDE = 1 << 10;
    }
}

/// Keyword spelling of each single-bit modifier, in print order
const KEYWORDS: &[(ModifierFlags, &str)] = &[
    (ModifierFlags::EXPORT, "export"),
    (ModifierFlags::DEFAULT_EXPORT, "default"),
    (ModifierFlags::DECLARE, "declare"),
    (ModifierFlags::PUBLIC, "public"),
    (ModifierFlags::PROTECTED, "protected"),
    (ModifierFlags::PRIVATE, "private"),
    (ModifierFlags::STATIC, "static"),
    (ModifierFlags::ABSTRACT, "abstract"),
    (ModifierFlags::OVERRIDE, "override"),
    (ModifierFlags::READONLY, "readonly"),
    (ModifierFlags::ASYNC, "async"),
];

impl ModifierFlags {
    /// Parse a single modifier keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(_, kw)| *kw == keyword)
            .map(|(flag, _)| *flag)
    }

    /// Keywords for every set modifier, in canonical order
    pub fn keywords(self) -> Vec<&'static str> {
        KEYWORDS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, kw)| *kw)
            .collect()
    }
}
