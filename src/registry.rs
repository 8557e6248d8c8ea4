use std::{
    collections::HashMap,
    fmt, io,
    marker::PhantomData,
    ops::Index,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{literal, usage, Error, FlagValue, IntoFlag, LiteralError, Result, Value};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// The set of flags a program understands.
///
/// Each [`Flags`] is independent: several can coexist, for example one per
/// subcommand.
#[derive(Debug)]
pub struct Flags {
    id: u64,
    entries: Vec<Entry>,
    by_name: HashMap<String, usize>,
}

/// A registered flag.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    usage: String,
    value: Value,
    default: Value,
}

/// Typed handle to a flag's current value, returned by [`Flags::set`].
///
/// Read it back with [`Flags::get`] or by indexing: `flags[handle]`.
pub struct Flag<T> {
    registry: u64,
    idx: usize,
    ty: PhantomData<fn() -> T>,
}

impl<T> Clone for Flag<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Flag<T> {}

impl<T> fmt::Debug for Flag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag").field("registry", &self.registry).field("idx", &self.idx).finish()
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::new()
    }
}

impl Flags {
    pub fn new() -> Flags {
        Flags {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Registers a flag called `name` with a default value and a usage line.
    ///
    /// The type of `default` fixes the type of the flag: integer literals are
    /// `i32`, float literals `f64` and `&str` is stored as a `String`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DuplicateFlag`] if `name` is already registered.
    pub fn set<D: IntoFlag>(
        &mut self,
        name: &str,
        default: D,
        usage: &str,
    ) -> Result<Flag<D::Stored>> {
        if self.by_name.contains_key(name) {
            return Err(Error::DuplicateFlag { name: name.to_string() });
        }
        let value = default.into_stored().into_value();
        tracing::debug!(flag = name, ty = value.type_name(), default = %value, "flag registered");

        let idx = self.entries.len();
        self.entries.push(Entry {
            name: name.to_string(),
            usage: usage.to_string(),
            default: value.clone(),
            value,
        });
        self.by_name.insert(name.to_string(), idx);
        Ok(Flag { registry: self.id, idx, ty: PhantomData })
    }

    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub(crate) fn lookup_mut(&mut self, name: &str) -> Option<&mut Entry> {
        let idx = *self.by_name.get(name)?;
        Some(&mut self.entries[idx])
    }

    /// Current value of a flag.
    ///
    /// # Panics
    ///
    /// Panics if `flag` was returned by a different [`Flags`].
    pub fn get<T: FlagValue>(&self, flag: Flag<T>) -> &T {
        assert_eq!(flag.registry, self.id, "flag handle used with a different `Flags`");
        match T::from_value(&self.entries[flag.idx].value) {
            Some(it) => it,
            None => unreachable!("flag type changed after registration"),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter()
    }

    pub fn usage(&self) -> String {
        usage::render(self.iter())
    }

    pub fn write_usage(&self, out: &mut dyn io::Write) -> io::Result<()> {
        out.write_all(self.usage().as_bytes())?;
        out.flush()
    }

    pub fn print_usage(&self) -> io::Result<()> {
        self.write_usage(&mut io::stdout().lock())
    }
}

impl<T: FlagValue> Index<Flag<T>> for Flags {
    type Output = T;

    fn index(&self, flag: Flag<T>) -> &T {
        self.get(flag)
    }
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn is_default(&self) -> bool {
        self.value == self.default
    }

    pub(crate) fn assign(&mut self, text: &str) -> Result<(), LiteralError> {
        let value = literal::convert(&self.value, text)?;
        debug_assert!(value.same_type(&self.default));
        self.value = value;
        Ok(())
    }

    /// Sets a boolean flag to `true`, leaves other types alone.
    pub(crate) fn assume_true(&mut self) -> bool {
        match &mut self.value {
            Value::Bool(it) => {
                *it = true;
                true
            }
            _ => false,
        }
    }
}
