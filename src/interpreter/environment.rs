use std::collections::HashMap;

use crate::{
    ast::VarType,
    error::RuntimeError,
    interpreter::{
        debug::{BindingView, ScopeSnapshot, ScopeTag},
        evaluator::core::EvalResult,
        value::{ArrayValue, Value},
    },
};

/// A storage cell: declared type, current value, and whether it was
/// declared under `ΣΤΑΘΕΡΕΣ`. Array slots keep their shape inside the
/// `Value::Array` they hold.
#[derive(Debug, Clone)]
pub struct Slot {
    /// The declared element type.
    pub var_type: VarType,
    /// The current value.
    pub value:    Value,
    /// Constant slots reject assignment.
    pub constant: bool,
}

impl Slot {
    /// A scalar slot initialized to the type's default value.
    #[must_use]
    pub const fn scalar(var_type: VarType) -> Self {
        Self { var_type,
               value: Value::default_for(var_type),
               constant: false }
    }

    /// An array slot with every cell at the element default.
    #[must_use]
    pub fn array(var_type: VarType, dims: Vec<usize>) -> Self {
        Self { var_type,
               value: Value::Array(ArrayValue::new(var_type, dims)),
               constant: false }
    }

    /// A constant slot holding an already-evaluated value.
    #[must_use]
    pub const fn constant(var_type: VarType, value: Value) -> Self {
        Self { var_type, value, constant: true }
    }
}

/// One scope of name-to-slot bindings. Iteration respects declaration
/// order so debugger snapshots read like the source.
#[derive(Debug, Default)]
pub struct Frame {
    slots: HashMap<String, Slot>,
    order: Vec<String>,
}

impl Frame {
    /// Creates a binding. The parser rejects duplicate declarations, so a
    /// name reaches this at most once per frame.
    pub fn declare(&mut self, name: &str, slot: Slot) {
        if self.slots.insert(name.to_string(), slot).is_none() {
            self.order.push(name.to_string());
        }
    }

    /// Looks a name up in this frame only.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    /// Mutable lookup in this frame only.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Slot> {
        self.slots.get_mut(name)
    }

    /// Whether this frame declares `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// The bindings in declaration order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.order.iter().map(|name| (name.as_str(), &self.slots[name]))
    }
}

/// The variable store of a run: the global frame plus the stack of call
/// frames. Scoping is flat — a name resolves in the innermost call frame
/// or in the globals, never anywhere else, because subprograms do not
/// nest.
#[derive(Debug, Default)]
pub struct Environment {
    globals: Frame,
    frames:  Vec<Frame>,
}

impl Environment {
    /// An environment with an empty global frame and no active calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a name in the global frame.
    pub fn declare_global(&mut self, name: &str, slot: Slot) {
        self.globals.declare(name, slot);
    }

    /// Enters a subprogram call with its already-bound frame.
    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Leaves the innermost subprogram call, discarding its bindings.
    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// The number of active subprogram calls.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn find(&self, name: &str) -> Option<&Slot> {
        if let Some(frame) = self.frames.last()
           && let Some(slot) = frame.get(name)
        {
            return Some(slot);
        }
        self.globals.get(name)
    }

    fn resolve(&self, name: &str, line: usize) -> EvalResult<&Slot> {
        self.find(name)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    fn resolve_mut(&mut self, name: &str, line: usize) -> EvalResult<&mut Slot> {
        let in_frame = self.frames.last().is_some_and(|frame| frame.contains(name));
        let slot = if in_frame {
            self.frames.last_mut().and_then(|frame| frame.get_mut(name))
        } else {
            self.globals.get_mut(name)
        };
        slot.ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// The declared type of a name plus whether it is an array. Used by
    /// `ΔΙΑΒΑΣΕ` to decide how to parse the input line.
    ///
    /// # Errors
    /// `UnknownVariable` when the name resolves nowhere.
    pub fn slot_info(&self, name: &str, line: usize) -> EvalResult<(VarType, bool)> {
        let slot = self.resolve(name, line)?;
        Ok((slot.var_type, matches!(slot.value, Value::Array(_))))
    }

    /// Reads a scalar's value, or a whole array as an array value (a
    /// copy).
    ///
    /// # Errors
    /// `UnknownVariable` when the name resolves nowhere.
    pub fn read(&self, name: &str, line: usize) -> EvalResult<Value> {
        Ok(self.resolve(name, line)?.value.clone())
    }

    /// Reads one array cell.
    ///
    /// # Errors
    /// `UnknownVariable`, `NotAnArray`, or the bounds errors of
    /// [`ArrayValue::get`].
    pub fn read_indexed(&self, name: &str, indices: &[i64], line: usize) -> EvalResult<Value> {
        let slot = self.resolve(name, line)?;
        match &slot.value {
            Value::Array(array) => array.get(name, indices, line),
            _ => Err(RuntimeError::NotAnArray { name: name.to_string(),
                                                line }),
        }
    }

    /// Assigns to a scalar slot (coercing to its declared type) or
    /// replaces a whole array with another of the same shape.
    ///
    /// # Errors
    /// `UnknownVariable`, `AssignmentToConstant`, `ArrayRequiresIndices`
    /// when a scalar lands on an array slot, `ShapeMismatch` on bounds
    /// disagreement, or a coercion failure.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let slot = self.resolve_mut(name, line)?;
        if slot.constant {
            return Err(RuntimeError::AssignmentToConstant { name: name.to_string(),
                                                            line });
        }
        match &mut slot.value {
            Value::Array(existing) => match value {
                Value::Array(incoming) => {
                    if incoming.dims != existing.dims {
                        return Err(RuntimeError::ShapeMismatch { line });
                    }
                    let elem_type = existing.elem_type;
                    let mut data = Vec::with_capacity(incoming.data.len());
                    for cell in incoming.data {
                        data.push(cell.coerce_to(elem_type, line)?);
                    }
                    existing.data = data;
                    Ok(())
                },
                _ => Err(RuntimeError::ArrayRequiresIndices { name: name.to_string(),
                                                              line }),
            },
            _ => {
                slot.value = value.coerce_to(slot.var_type, line)?;
                Ok(())
            },
        }
    }

    /// Assigns to one array cell, coercing to the element type.
    ///
    /// # Errors
    /// `UnknownVariable`, `AssignmentToConstant`, `NotAnArray`, or the
    /// bounds/coercion errors of [`ArrayValue::set`].
    pub fn assign_indexed(&mut self, name: &str, indices: &[i64], value: Value, line: usize)
                          -> EvalResult<()> {
        let slot = self.resolve_mut(name, line)?;
        if slot.constant {
            return Err(RuntimeError::AssignmentToConstant { name: name.to_string(),
                                                            line });
        }
        match &mut slot.value {
            Value::Array(array) => array.set(name, indices, value, line),
            _ => Err(RuntimeError::NotAnArray { name: name.to_string(),
                                                line }),
        }
    }

    /// Builds the debugger's view of every visible binding: the innermost
    /// frame first (tagged local), then unshadowed globals (tagged outer —
    /// or local while the main body runs).
    #[must_use]
    pub fn snapshot(&self) -> ScopeSnapshot {
        let mut bindings = Vec::new();
        let current = self.frames.last();

        if let Some(frame) = current {
            for (name, slot) in frame.iter_ordered() {
                bindings.push(binding_view(name, slot, ScopeTag::Local));
            }
        }
        let global_tag = if current.is_some() { ScopeTag::Outer } else { ScopeTag::Local };
        for (name, slot) in self.globals.iter_ordered() {
            let shadowed = current.is_some_and(|frame| frame.contains(name));
            if !shadowed {
                bindings.push(binding_view(name, slot, global_tag));
            }
        }

        ScopeSnapshot { bindings }
    }
}

fn binding_view(name: &str, slot: &Slot, scope: ScopeTag) -> BindingView {
    let dims = match &slot.value {
        Value::Array(array) => Some(array.dims.clone()),
        _ => None,
    };
    BindingView { name: name.to_string(),
                  var_type: slot.var_type,
                  dims,
                  value: slot.value.clone(),
                  scope }
}
