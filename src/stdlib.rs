// ═══════════════════════════════════════════════════════════
// Frenchy Standard Library: built-in constants and functions
// ═══════════════════════════════════════════════════════════

use std::f32::consts::PI;

use crate::console::Console;
use crate::error::Fault;
use crate::scope::Scopes;
use crate::value::{NativeCallable, Signature, Value};

/// What a native sees while it runs: the scopes (read-only) and the console.
pub struct NativeContext<'a> {
    pub scopes: &'a Scopes,
    pub console: &'a mut dyn Console,
}

/// Seeds the Constants scope. Called once when an interpreter is built.
pub fn register(scopes: &mut Scopes) {
    scopes.seed_constant("PI", Value::Float(PI));

    let natives = [
        // I/O
        NativeCallable::new("afficher", Signature::Variadic, print),
        NativeCallable::new("MsgConsole", Signature::Variadic, print),
        NativeCallable::new("pause", Signature::Nullary, pause),
        // Lists
        NativeCallable::new("taille", Signature::SingleText, size),
    ];
    for native in natives {
        scopes.seed_constant(native.name, Value::Native(native));
    }
}

pub fn call_native(native: &NativeCallable, args: Vec<Value>, ctx: &mut NativeContext<'_>) -> Result<Value, Fault> {
    if !native.signature.accepts(&args) {
        let kinds: Vec<&str> = args.iter().map(Value::kind_name).collect();
        return Err(Fault::Signature(format!(
            "{} takes {}, got ({})", native.name, native.signature.describe(), kinds.join(", ")
        )));
    }
    (native.func)(ctx, args)
}

// ── I/O ─────────────────────────────────────────────────────────────────────

fn print(ctx: &mut NativeContext<'_>, args: Vec<Value>) -> Result<Value, Fault> {
    for arg in &args {
        ctx.console.print_line(&arg.to_string())?;
    }
    Ok(Value::Null)
}

fn pause(ctx: &mut NativeContext<'_>, _args: Vec<Value>) -> Result<Value, Fault> {
    ctx.console.wait_for_input()?;
    Ok(Value::Null)
}

// ── Lists ───────────────────────────────────────────────────────────────────

fn size(ctx: &mut NativeContext<'_>, args: Vec<Value>) -> Result<Value, Fault> {
    let name = match args.first() {
        Some(Value::Text(name)) => name,
        _ => return Err(Fault::Signature("taille takes a single Text argument".into())),
    };
    let (_, list) = ctx.scopes.list(name)?;
    i32::try_from(list.len())
        .map(Value::Integer)
        .map_err(|_| Fault::TypeMismatch(format!("list '{}' is too long for an Integer", name)))
}
