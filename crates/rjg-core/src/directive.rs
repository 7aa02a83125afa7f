use std::fmt;

/// Reserved directive recognized inside templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DirectiveKind {
    Int,
    Str,
    Arr,
    Obj,
    OneOf,
    Optional,
    Iteration,
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    I64,
    Digit,
    Bool,
    Alpha,
}

/// Shape of the parameters a directive accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// No parameters; anything attached in object form is ignored.
    None,
    /// An object with named fields (`{min, max}`, `{len, val}`).
    Fields,
    /// An array whose elements are templates resolved on demand.
    List,
    /// Either a list of templates or a single resolvable value.
    ListOrValue,
    /// A single template value.
    Value,
}

const ALL: [DirectiveKind; 17] = [
    DirectiveKind::Int,
    DirectiveKind::Str,
    DirectiveKind::Arr,
    DirectiveKind::Obj,
    DirectiveKind::OneOf,
    DirectiveKind::Optional,
    DirectiveKind::Iteration,
    DirectiveKind::U8,
    DirectiveKind::U16,
    DirectiveKind::U32,
    DirectiveKind::I8,
    DirectiveKind::I16,
    DirectiveKind::I32,
    DirectiveKind::I64,
    DirectiveKind::Digit,
    DirectiveKind::Bool,
    DirectiveKind::Alpha,
];

impl DirectiveKind {
    /// Look up a directive by its unprefixed name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "int" => DirectiveKind::Int,
            "str" => DirectiveKind::Str,
            "arr" => DirectiveKind::Arr,
            "obj" => DirectiveKind::Obj,
            "oneof" => DirectiveKind::OneOf,
            "option" => DirectiveKind::Optional,
            "i" => DirectiveKind::Iteration,
            "u8" => DirectiveKind::U8,
            "u16" => DirectiveKind::U16,
            "u32" => DirectiveKind::U32,
            "i8" => DirectiveKind::I8,
            "i16" => DirectiveKind::I16,
            "i32" => DirectiveKind::I32,
            "i64" => DirectiveKind::I64,
            "digit" => DirectiveKind::Digit,
            "bool" => DirectiveKind::Bool,
            "alpha" => DirectiveKind::Alpha,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            DirectiveKind::Int => "int",
            DirectiveKind::Str => "str",
            DirectiveKind::Arr => "arr",
            DirectiveKind::Obj => "obj",
            DirectiveKind::OneOf => "oneof",
            DirectiveKind::Optional => "option",
            DirectiveKind::Iteration => "i",
            DirectiveKind::U8 => "u8",
            DirectiveKind::U16 => "u16",
            DirectiveKind::U32 => "u32",
            DirectiveKind::I8 => "i8",
            DirectiveKind::I16 => "i16",
            DirectiveKind::I32 => "i32",
            DirectiveKind::I64 => "i64",
            DirectiveKind::Digit => "digit",
            DirectiveKind::Bool => "bool",
            DirectiveKind::Alpha => "alpha",
        }
    }

    pub fn shape(self) -> ParamShape {
        match self {
            DirectiveKind::Int | DirectiveKind::Arr => ParamShape::Fields,
            DirectiveKind::Str => ParamShape::ListOrValue,
            DirectiveKind::Obj | DirectiveKind::OneOf => ParamShape::List,
            DirectiveKind::Optional => ParamShape::Value,
            DirectiveKind::Iteration
            | DirectiveKind::U8
            | DirectiveKind::U16
            | DirectiveKind::U32
            | DirectiveKind::I8
            | DirectiveKind::I16
            | DirectiveKind::I32
            | DirectiveKind::I64
            | DirectiveKind::Digit
            | DirectiveKind::Bool
            | DirectiveKind::Alpha => ParamShape::None,
        }
    }

    /// Whether an array parameter is compiled element by element.
    pub fn accepts_list(self) -> bool {
        matches!(self.shape(), ParamShape::List | ParamShape::ListOrValue)
    }

    /// Every directive, in declaration order.
    pub fn all() -> impl Iterator<Item = DirectiveKind> {
        ALL.into_iter()
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
