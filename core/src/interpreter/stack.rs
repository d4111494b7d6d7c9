//! Variable store
//!
//! A flat, named arena. `alc` reserves capacity out of the arena size the
//! program builder computed; plain assignment creates unsized variables that
//! do not count against it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::errors::StackError;
use super::types::Val;

/// Status register written by the engine after every instruction
pub const STATUS_REGISTER: &str = "slx";

/// Names user instructions may never write, drop, or allocate
pub const RESERVED_NAMES: &[&str] = &[STATUS_REGISTER];

/// One storage slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// `None` until first written
    pub value: Option<Val>,
    /// Byte capacity from `alc`; unsized when `None`
    pub capacity: Option<usize>,
    pub reserved: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stack {
    size: usize,
    vars: IndexMap<String, Variable>,
}

impl Stack {
    /// Create a store whose allocations may total `size` bytes
    pub fn new(size: usize) -> Self {
        Self {
            size,
            vars: IndexMap::new(),
        }
    }

    /// Arena size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bytes currently held by live allocations
    pub fn used(&self) -> usize {
        self.vars.values().filter_map(|v| v.capacity).sum()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    /// Variables in creation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.vars.iter().map(|(name, var)| (name.as_str(), var))
    }

    fn is_reserved(&self, name: &str) -> bool {
        RESERVED_NAMES.contains(&name) || self.vars.get(name).is_some_and(|v| v.reserved)
    }

    /// Allocate `capacity` bytes for `name`, replacing any existing variable
    pub fn allocate(&mut self, name: &str, capacity: usize) -> Result<(), StackError> {
        if self.is_reserved(name) {
            return Err(StackError::Reserved {
                name: name.to_string(),
            });
        }

        let released = self.vars.get(name).and_then(|v| v.capacity).unwrap_or(0);
        let used = self.used() - released;
        let fits = used
            .checked_add(capacity)
            .is_some_and(|total| total <= self.size);
        if !fits {
            return Err(StackError::ArenaExhausted {
                name: name.to_string(),
                requested: capacity,
                used,
                total: self.size,
            });
        }

        self.vars.insert(
            name.to_string(),
            Variable {
                value: None,
                capacity: Some(capacity),
                reserved: false,
            },
        );
        Ok(())
    }

    /// Write on behalf of a user instruction
    pub fn write(&mut self, name: &str, value: Val) -> Result<(), StackError> {
        if self.is_reserved(name) {
            return Err(StackError::Reserved {
                name: name.to_string(),
            });
        }
        self.store(name, value, false)
    }

    /// Engine-only write path; bypasses the reserved check and marks the
    /// variable reserved
    pub(crate) fn write_reserved(&mut self, name: &str, value: Val) -> Result<(), StackError> {
        self.store(name, value, true)
    }

    fn store(&mut self, name: &str, value: Val, reserved: bool) -> Result<(), StackError> {
        let Some(var) = self.vars.get_mut(name) else {
            self.vars.insert(
                name.to_string(),
                Variable {
                    value: Some(value),
                    capacity: None,
                    reserved,
                },
            );
            return Ok(());
        };

        if let Some(capacity) = var.capacity {
            let size = value.encoded_len();
            if size > capacity {
                return Err(StackError::CapacityExceeded {
                    name: name.to_string(),
                    capacity,
                    size,
                });
            }
        }

        var.value = Some(value);
        var.reserved |= reserved;
        Ok(())
    }

    /// Current value of `name`
    pub fn read(&self, name: &str) -> Result<&Val, StackError> {
        match self.vars.get(name) {
            Some(Variable {
                value: Some(value), ..
            }) => Ok(value),
            Some(_) => Err(StackError::NoData {
                name: name.to_string(),
            }),
            None => Err(StackError::Undefined {
                name: name.to_string(),
            }),
        }
    }

    /// Remove `name` and release its allocation
    pub fn drop_variable(&mut self, name: &str) -> Result<Variable, StackError> {
        if self.is_reserved(name) {
            return Err(StackError::Reserved {
                name: name.to_string(),
            });
        }
        self.vars
            .shift_remove(name)
            .ok_or_else(|| StackError::Undefined {
                name: name.to_string(),
            })
    }
}
