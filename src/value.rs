// ═══════════════════════════════════════════════════════════
// Frenchy values: runtime kinds, literals and operator coercion
// ═══════════════════════════════════════════════════════════

use std::fmt;

use crate::ast::{ArithOp, BinOp, CmpOp, ElementType, Literal, LiteralKind, OpClass};
use crate::error::Fault;
use crate::stdlib::NativeContext;

// ── Values ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i32),
    Float(f32),
    Text(String),
    Boolean(bool),
    Null,
    List(ListValue),
    Native(NativeCallable),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Float(_)   => "Float",
            Value::Text(_)    => "Text",
            Value::Boolean(_) => "Boolean",
            Value::Null       => "Null",
            Value::List(_)    => "List",
            Value::Native(_)  => "NativeCallable",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn matches(&self, element: ElementType) -> bool {
        matches!(
            (self, element),
            (Value::Integer(_), ElementType::Integer)
                | (Value::Float(_), ElementType::Float)
                | (Value::Text(_), ElementType::Text)
                | (Value::Boolean(_), ElementType::Boolean)
        )
    }

    /// Conditions must already be booleans; there is no truthiness.
    pub fn as_bool(&self) -> Result<bool, Fault> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(Fault::not_boolean(other.kind_name())),
        }
    }

    pub fn from_literal(literal: &Literal) -> Result<Value, Fault> {
        let text = literal.text.as_str();
        match literal.kind {
            LiteralKind::Integer => text.parse::<i32>()
                .map(Value::Integer)
                .map_err(|_| Fault::TypeMismatch(format!("invalid integer literal '{}'", text))),
            LiteralKind::Decimal => text.parse::<f32>()
                .map(Value::Float)
                .map_err(|_| Fault::TypeMismatch(format!("invalid decimal literal '{}'", text))),
            LiteralKind::Text => text.strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .map(|inner| Value::Text(inner.to_string()))
                .ok_or_else(|| Fault::TypeMismatch(format!("invalid text literal {}", text))),
            LiteralKind::Boolean => match text {
                "vrai" | "true"  => Ok(Value::Boolean(true)),
                "faux" | "false" => Ok(Value::Boolean(false)),
                _ => Err(Fault::TypeMismatch(format!("invalid boolean literal '{}'", text))),
            },
            LiteralKind::Null => Ok(Value::Null),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x)   => write!(f, "{}", x),
            Value::Text(s)    => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", if *b { "vrai" } else { "faux" }),
            Value::Null       => write!(f, "nul"),
            Value::List(list) => {
                write!(f, "[")?;
                for (i, x) in list.items().iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", x)?;
                }
                write!(f, "]")
            }
            Value::Native(native) => write!(f, "<native {}>", native.name),
        }
    }
}

// ── Lists ─────────────────────────────────────────────────────────────────────

/// An ordered sequence whose element type is fixed when it is built.
#[derive(Clone, Debug, PartialEq)]
pub struct ListValue {
    element: ElementType,
    items: Vec<Value>,
}

impl ListValue {
    /// Checks every element against the tag before building the list.
    pub fn new(element: ElementType, items: Vec<Value>) -> Result<Self, Fault> {
        for (index, item) in items.iter().enumerate() {
            check_element(element, index, item)?;
        }
        Ok(ListValue { element, items })
    }

    pub fn element(&self) -> ElementType {
        self.element
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn set(&mut self, index: usize, value: Value) -> Result<(), Fault> {
        check_element(self.element, index, &value)?;
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Fault::TypeMismatch(format!(
                "index {} is outside a list of length {}", index, self.items.len()
            ))),
        }
    }
}

fn check_element(element: ElementType, index: usize, value: &Value) -> Result<(), Fault> {
    if value.matches(element) {
        Ok(())
    } else {
        Err(Fault::TypeMismatch(format!(
            "list element {} ({}) is {}, expected {}",
            index, value, value.kind_name(), element
        )))
    }
}

// ── Native callables ──────────────────────────────────────────────────────────

pub type NativeFn = fn(&mut NativeContext<'_>, Vec<Value>) -> Result<Value, Fault>;

/// Call shape a native accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// No arguments, e.g. `pause()`.
    Nullary,
    /// Any number of arguments of any kind, e.g. `afficher(a, b)`.
    Variadic,
    /// Exactly one Text argument, returns an Integer.
    SingleText,
}

impl Signature {
    pub fn accepts(self, args: &[Value]) -> bool {
        match self {
            Signature::Nullary    => args.is_empty(),
            Signature::Variadic   => true,
            Signature::SingleText => matches!(args, [Value::Text(_)]),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Signature::Nullary    => "no arguments",
            Signature::Variadic   => "any arguments",
            Signature::SingleText => "a single Text argument",
        }
    }
}

#[derive(Clone, Copy)]
pub struct NativeCallable {
    pub name: &'static str,
    pub signature: Signature,
    pub func: NativeFn,
}

impl NativeCallable {
    pub fn new(name: &'static str, signature: Signature, func: NativeFn) -> Self {
        NativeCallable { name, signature, func }
    }
}

impl fmt::Debug for NativeCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCallable")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish()
    }
}

impl PartialEq for NativeCallable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.signature == other.signature
    }
}

// ── Binary operations ─────────────────────────────────────────────────────────

pub fn eval_binop(l: &Value, op: BinOp, r: &Value) -> Result<Value, Fault> {
    match op.class() {
        OpClass::Arith(arith) => arithmetic_op(l, op, arith, r),
        OpClass::Cmp(cmp) => compare_op(l, op, cmp, r).map(Value::Boolean),
    }
}

fn mismatch(l: &Value, op: BinOp, r: &Value) -> Fault {
    Fault::TypeMismatch(format!(
        "cannot apply '{}' to {} and {}", op.symbol(), l.kind_name(), r.kind_name()
    ))
}

fn arithmetic_op(l: &Value, op: BinOp, arith: ArithOp, r: &Value) -> Result<Value, Fault> {
    if arith == ArithOp::Add && (matches!(l, Value::Text(_)) || matches!(r, Value::Text(_))) {
        return Ok(Value::Text(format!("{}{}", l, r)));
    }
    match (l, r) {
        (Value::Integer(a), Value::Integer(b)) => int_op(*a, arith, *b)
            .map(Value::Integer)
            .ok_or_else(|| Fault::DivideByZero(format!("{} {} 0", a, op.symbol()))),
        (Value::Float(a), Value::Float(b))     => Ok(Value::Float(float_op(*a, arith, *b))),
        (Value::Integer(a), Value::Float(b))   => Ok(Value::Float(float_op(*a as f32, arith, *b))),
        (Value::Float(a), Value::Integer(b))   => Ok(Value::Float(float_op(*a, arith, *b as f32))),
        _ => Err(mismatch(l, op, r)),
    }
}

/// `None` on an Integer division or remainder by zero.
fn int_op(a: i32, op: ArithOp, b: i32) -> Option<i32> {
    match op {
        ArithOp::Add => Some(a.wrapping_add(b)),
        ArithOp::Sub => Some(a.wrapping_sub(b)),
        ArithOp::Mul => Some(a.wrapping_mul(b)),
        ArithOp::Div => (b != 0).then(|| a.wrapping_div(b)),
        ArithOp::Mod => (b != 0).then(|| a.wrapping_rem(b)),
    }
}

fn float_op(a: f32, op: ArithOp, b: f32) -> f32 {
    match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => a / b,
        ArithOp::Mod => a % b,
    }
}

fn compare_op(l: &Value, op: BinOp, cmp: CmpOp, r: &Value) -> Result<bool, Fault> {
    match (l, r) {
        (Value::Integer(a), Value::Integer(b)) => Ok(ordered(*a, cmp, *b)),
        (Value::Float(a), Value::Float(b))     => Ok(ordered(*a, cmp, *b)),
        (Value::Integer(a), Value::Float(b))   => Ok(ordered(*a as f32, cmp, *b)),
        (Value::Float(a), Value::Integer(b))   => Ok(ordered(*a, cmp, *b as f32)),
        _ => match cmp {
            CmpOp::Eq | CmpOp::NotEq => {
                let equal = structural_eq(l, r).ok_or_else(|| mismatch(l, op, r))?;
                Ok(if cmp == CmpOp::Eq { equal } else { !equal })
            }
            CmpOp::Gt | CmpOp::Lt | CmpOp::GtEq | CmpOp::LtEq => Err(mismatch(l, op, r)),
        },
    }
}

/// Equality for the non-numeric kinds. Null compares against Text and Boolean
/// (always unequal); every other cross-kind pair has no equality.
fn structural_eq(l: &Value, r: &Value) -> Option<bool> {
    match (l, r) {
        (Value::Text(a), Value::Text(b))       => Some(a == b),
        (Value::Boolean(a), Value::Boolean(b)) => Some(a == b),
        (Value::Null, Value::Null)             => Some(true),
        (Value::Null, Value::Text(_) | Value::Boolean(_))
        | (Value::Text(_) | Value::Boolean(_), Value::Null) => Some(false),
        _ => None,
    }
}

fn ordered<T: PartialOrd>(a: T, op: CmpOp, b: T) -> bool {
    match op {
        CmpOp::Eq    => a == b,
        CmpOp::NotEq => a != b,
        CmpOp::Gt    => a > b,
        CmpOp::Lt    => a < b,
        CmpOp::GtEq  => a >= b,
        CmpOp::LtEq  => a <= b,
    }
}
