//! YAF value representation
//!
//! This module defines the runtime representation of YAF values, which must
//! match the `YafValue` layout emitted by the LLVM and C backends
//! (see `include/yaf_runtime.h`): a one-byte tag followed by an 8-byte
//! payload union.

use std::borrow::Cow;
use std::ffi::{CStr, CString, c_char, c_void};
use std::fmt;
use std::ptr::{self, NonNull};

/// Value type tags - must match the `YAF_*` constants in `yaf_runtime.h`
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTag {
    Int = 0,
    Float = 1,
    String = 2,
    Bool = 3,
    Array = 4,
}

impl ValueTag {
    /// The ABI discriminant of this tag.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            ValueTag::Int => "Int",
            ValueTag::Float => "Float",
            ValueTag::String => "String",
            ValueTag::Bool => "Bool",
            ValueTag::Array => "Array",
        }
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owned text buffer of a String value.
///
/// The slot holds a NUL-terminated buffer allocated by this runtime, or
/// nothing once the value has been released. A released string reads as `""`.
#[repr(transparent)]
pub struct YafString {
    buf: Option<NonNull<c_char>>,
}

impl YafString {
    /// Copy `text` into a new buffer. Text after an embedded NUL is dropped.
    pub fn new(text: &[u8]) -> Self {
        let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
        // SAFETY: `text[..end]` contains no NUL byte.
        let owned = unsafe { CString::from_vec_unchecked(text[..end].to_vec()) };
        YafString {
            buf: NonNull::new(owned.into_raw()),
        }
    }

    /// A slot in the released state.
    pub const fn released() -> Self {
        YafString { buf: None }
    }

    pub fn is_released(&self) -> bool {
        self.buf.is_none()
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self.buf {
            // SAFETY: a live slot always holds a pointer obtained from
            // `CString::into_raw` that has not been released yet.
            Some(ptr) => unsafe { CStr::from_ptr(ptr.as_ptr()) }.to_bytes(),
            None => b"",
        }
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Byte length, not counting the terminator.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pointer to the NUL-terminated buffer, or null when released.
    pub fn as_ptr(&self) -> *const c_char {
        self.buf.map_or(ptr::null(), |p| p.as_ptr() as *const c_char)
    }

    /// Allocate an independent copy of this text.
    pub fn duplicate(&self) -> Self {
        YafString::new(self.as_bytes())
    }

    /// Free the buffer and clear the slot. Calling this again does nothing.
    pub fn release(&mut self) {
        if let Some(ptr) = self.buf.take() {
            // SAFETY: the pointer came from `CString::into_raw` and the slot
            // has just been cleared, so it cannot be freed twice through it.
            drop(unsafe { CString::from_raw(ptr.as_ptr()) });
        }
    }
}

impl fmt::Debug for YafString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_released() {
            f.write_str("<released>")
        } else {
            write!(f, "{:?}", self.to_string_lossy())
        }
    }
}

/// Opaque payload of the reserved Array tag.
///
/// No operation in this runtime creates or inspects array payloads yet; the
/// tag and its slot exist so composite values can be added without
/// renumbering the ABI.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayRef(*mut c_void);

impl ArrayRef {
    pub const fn null() -> Self {
        ArrayRef(ptr::null_mut())
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0
    }
}

/// Main YAF value type - layout shared with generated code.
///
/// Values are moved, never implicitly copied: a bitwise copy of a String
/// value aliases its buffer, so the only way to make one is the `unsafe`
/// [`YafValue::share`].
#[repr(C, u8)]
pub enum YafValue {
    Int(i64) = 0,
    Float(f64) = 1,
    String(YafString) = 2,
    Bool(bool) = 3,
    Array(ArrayRef) = 4,
}

impl YafValue {
    pub fn int(value: i64) -> Self {
        YafValue::Int(value)
    }

    pub fn float(value: f64) -> Self {
        YafValue::Float(value)
    }

    /// Create a string value owning a copy of `text`
    pub fn string(text: impl AsRef<[u8]>) -> Self {
        YafValue::String(YafString::new(text.as_ref()))
    }

    pub fn bool(value: bool) -> Self {
        YafValue::Bool(value)
    }

    /// The "no value" convention: Int 0.
    pub fn void() -> Self {
        YafValue::Int(0)
    }

    pub fn tag(&self) -> ValueTag {
        match self {
            YafValue::Int(_) => ValueTag::Int,
            YafValue::Float(_) => ValueTag::Float,
            YafValue::String(_) => ValueTag::String,
            YafValue::Bool(_) => ValueTag::Bool,
            YafValue::Array(_) => ValueTag::Array,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            YafValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            YafValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            YafValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            YafValue::String(text) => Some(text.as_bytes()),
            _ => None,
        }
    }

    /// Deep copy: strings get their own buffer.
    pub fn duplicate(&self) -> Self {
        match self {
            YafValue::Int(n) => YafValue::Int(*n),
            YafValue::Float(x) => YafValue::Float(*x),
            YafValue::String(text) => YafValue::String(text.duplicate()),
            YafValue::Bool(b) => YafValue::Bool(*b),
            YafValue::Array(array) => YafValue::Array(*array),
        }
    }

    /// Bitwise copy, the way generated code passes values around.
    ///
    /// # Safety
    ///
    /// For String values both copies refer to the same buffer. At most one of
    /// them may be released, and neither may be read after that release.
    pub unsafe fn share(&self) -> Self {
        // SAFETY: every variant is plain data; ownership rules are the
        // caller's responsibility as documented above.
        unsafe { ptr::read(self) }
    }

    /// Free the owned buffer of a String value; no-op for every other tag.
    pub fn release(&mut self) {
        match self {
            YafValue::String(text) => text.release(),
            YafValue::Int(_) | YafValue::Float(_) | YafValue::Bool(_) | YafValue::Array(_) => {}
        }
    }
}

impl PartialEq for YafValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (YafValue::Int(a), YafValue::Int(b)) => a == b,
            (YafValue::Float(a), YafValue::Float(b)) => a == b,
            (YafValue::String(a), YafValue::String(b)) => a.as_bytes() == b.as_bytes(),
            (YafValue::Bool(a), YafValue::Bool(b)) => a == b,
            (YafValue::Array(a), YafValue::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for YafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YafValue::Int(n) => write!(f, "Int({n})"),
            YafValue::Float(x) => write!(f, "Float({x})"),
            YafValue::String(text) => write!(f, "String({text:?})"),
            YafValue::Bool(b) => write!(f, "Bool({b})"),
            YafValue::Array(array) => write!(f, "Array({:p})", array.as_ptr()),
        }
    }
}

impl fmt::Display for YafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&crate::convert::render_text(self)))
    }
}

// Ensure the layout matches what the backends expect
#[cfg(target_pointer_width = "64")]
const _: () = {
    // tag(1) + padding(7) + payload(8)
    assert!(std::mem::size_of::<YafValue>() == 16);
    assert!(std::mem::align_of::<YafValue>() == 8);
    assert!(std::mem::size_of::<YafString>() == std::mem::size_of::<*mut c_char>());
};
