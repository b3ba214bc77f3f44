use std::collections::HashMap;

use super::prelude::Value;

pub type FrameId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeError {
    AlreadyDeclared,
    Undefined,
}

#[derive(Default, Debug, Clone, PartialEq)]
struct Frame {
    store: HashMap<String, Value>,
    enclosing: Option<FrameId>,
}

/// Scope chain kept as a stack of frames. Each frame records the index of
/// the frame it was opened from, and lookups walk those indices outwards.
/// Frame 0 is the global frame and is never popped.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    frames: Vec<Frame>,
    current: FrameId,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
            current: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_frame(&mut self) -> FrameId {
        self.frames.push(Frame {
            store: HashMap::new(),
            enclosing: Some(self.current),
        });

        self.current = self.frames.len() - 1;
        self.current
    }

    pub fn pop_frame(&mut self) {
        if self.current == 0 {
            return;
        }

        if let Some(frame) = self.frames.pop() {
            self.current = frame.enclosing.unwrap_or(0);
        }
    }

    /// Binds `name` in the innermost frame. Shadowing an outer binding is
    /// fine, repeating a name within one frame is not.
    pub fn declare(&mut self, name: &str, value: Value) -> Result<(), ScopeError> {
        if self.is_declared_here(name) {
            return Err(ScopeError::AlreadyDeclared);
        }

        self.frames[self.current].store.insert(name.to_string(), value);

        Ok(())
    }

    /// Rebinds the nearest visible `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), ScopeError> {
        let id = self.resolve(name).ok_or(ScopeError::Undefined)?;

        if let Some(slot) = self.frames[id].store.get_mut(name) {
            *slot = value;
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.resolve(name)
            .and_then(|id| self.frames[id].store.get(name))
    }

    pub fn is_declared_here(&self, name: &str) -> bool {
        self.frames[self.current].store.contains_key(name)
    }

    fn resolve(&self, name: &str) -> Option<FrameId> {
        let mut frame = Some(self.current);

        while let Some(id) = frame {
            if self.frames[id].store.contains_key(name) {
                return Some(id);
            }

            frame = self.frames[id].enclosing;
        }

        None
    }
}
