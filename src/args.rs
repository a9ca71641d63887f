//! Typed destination slots and the cursor that hands them out.
//!
//! The C family receives its destinations through `...`; here every call
//! site builds an ordered list of [`Arg`]s from its own typed references. The
//! interpreter takes them strictly in order through an [`ArgCursor`].

use std::collections::VecDeque;

/// One caller-supplied output slot.
///
/// Integers are matched by storage width, not signedness: `%u` may store
/// into an `i32` and `%d` into a `u32`, as in C.
#[derive(Debug)]
#[non_exhaustive]
pub enum Arg<'a> {
    /// `%hhd`, `%hhn`, …
    I8(&'a mut i8),
    /// `%hhu`, …
    U8(&'a mut u8),
    /// `%hd`, …
    I16(&'a mut i16),
    /// `%hu`, …
    U16(&'a mut u16),
    /// `%d`, `%ld`, `%n`, …
    I32(&'a mut i32),
    /// `%u`, `%x`, …
    U32(&'a mut u32),
    /// `%lld`, `%I64d`, `%jd`, …
    I64(&'a mut i64),
    /// `%llu`, `%I64x`, …
    U64(&'a mut u64),
    /// `%zd`, `%td`, `%Id`, `%p`
    Isize(&'a mut isize),
    /// `%zu`, `%Iu`, `%p`
    Usize(&'a mut usize),
    /// `%f`, `%e`, `%g`, `%a`
    F32(&'a mut f32),
    /// `%lf`, `%Lf`, …
    F64(&'a mut f64),
    /// Narrow character buffer for `%s`, `%c`, `%[`
    Narrow(&'a mut [u8]),
    /// Wide character buffer for `%ls`, `%S`, `%C`, …
    Wide(&'a mut [u16]),
    /// Buffer capacity paired with the preceding buffer (secure variants)
    Capacity(usize),
}

impl Arg<'_> {
    /// Short description of the slot type, used in contract violations.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::I8(_) => "i8",
            Self::U8(_) => "u8",
            Self::I16(_) => "i16",
            Self::U16(_) => "u16",
            Self::I32(_) => "i32",
            Self::U32(_) => "u32",
            Self::I64(_) => "i64",
            Self::U64(_) => "u64",
            Self::Isize(_) => "isize",
            Self::Usize(_) => "usize",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Narrow(_) => "narrow buffer",
            Self::Wide(_) => "wide buffer",
            Self::Capacity(_) => "capacity",
        }
    }

    /// Storage width of an integer slot.
    pub(crate) fn int_bits(&self) -> Option<u32> {
        match self {
            Self::I8(_) | Self::U8(_) => Some(8),
            Self::I16(_) | Self::U16(_) => Some(16),
            Self::I32(_) | Self::U32(_) => Some(32),
            Self::I64(_) | Self::U64(_) => Some(64),
            Self::Isize(_) | Self::Usize(_) => Some(usize::BITS),
            _ => None,
        }
    }

    /// Stores `value` into a float slot, rounding for `f32`.
    pub(crate) fn store_float(self, value: f64) -> bool {
        match self {
            Self::F32(slot) => *slot = value as f32,
            Self::F64(slot) => *slot = value,
            _ => return false,
        }
        true
    }

    /// Stores the low `bits` bits of `value` if this is an integer slot of
    /// exactly that width. Returns false (storing nothing) otherwise.
    pub(crate) fn store_int(self, value: u64, bits: u32) -> bool {
        match (self, bits) {
            (Self::I8(slot), 8) => *slot = value as i8,
            (Self::U8(slot), 8) => *slot = value as u8,
            (Self::I16(slot), 16) => *slot = value as i16,
            (Self::U16(slot), 16) => *slot = value as u16,
            (Self::I32(slot), 32) => *slot = value as i32,
            (Self::U32(slot), 32) => *slot = value as u32,
            (Self::I64(slot), 64) => *slot = value as i64,
            (Self::U64(slot), 64) => *slot = value,
            (Self::Isize(slot), bits) if bits == usize::BITS => *slot = value as isize,
            (Self::Usize(slot), bits) if bits == usize::BITS => *slot = value as usize,
            _ => return false,
        }
        true
    }
}

macro_rules! impl_from_ref {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $ty> for Arg<'a> {
                fn from(slot: &'a mut $ty) -> Self {
                    Self::$variant(slot)
                }
            }
        )*
    };
}

impl_from_ref! {
    i8 => I8, u8 => U8, i16 => I16, u16 => U16, i32 => I32, u32 => U32,
    i64 => I64, u64 => U64, isize => Isize, usize => Usize, f32 => F32, f64 => F64,
    [u8] => Narrow, [u16] => Wide,
}

impl<'a, const N: usize> From<&'a mut [u8; N]> for Arg<'a> {
    fn from(buffer: &'a mut [u8; N]) -> Self {
        Self::Narrow(buffer)
    }
}

impl<'a, const N: usize> From<&'a mut [u16; N]> for Arg<'a> {
    fn from(buffer: &'a mut [u16; N]) -> Self {
        Self::Wide(buffer)
    }
}

impl<'a> From<&'a mut Vec<u8>> for Arg<'a> {
    fn from(buffer: &'a mut Vec<u8>) -> Self {
        Self::Narrow(buffer.as_mut_slice())
    }
}

impl<'a> From<&'a mut Vec<u16>> for Arg<'a> {
    fn from(buffer: &'a mut Vec<u16>) -> Self {
        Self::Wide(buffer.as_mut_slice())
    }
}

/// Ordered, one-directional sequence of destination slots.
#[derive(Debug, Default)]
pub struct ArgCursor<'a> {
    slots: VecDeque<Arg<'a>>,
    taken: usize,
}

impl<'a> ArgCursor<'a> {
    /// Collects the slots of one call
    pub fn new(args: impl IntoIterator<Item = Arg<'a>>) -> Self {
        Self {
            slots: args.into_iter().collect(),
            taken: 0,
        }
    }

    /// Moves the next slot out of the cursor
    pub fn next_arg(&mut self) -> Option<Arg<'a>> {
        let arg = self.slots.pop_front()?;
        self.taken += 1;
        Some(arg)
    }

    /// Number of slots handed out so far
    pub fn taken(&self) -> usize {
        self.taken
    }

    /// Number of slots not yet handed out
    pub fn remaining(&self) -> usize {
        self.slots.len()
    }
}

impl<'a> FromIterator<Arg<'a>> for ArgCursor<'a> {
    fn from_iter<I: IntoIterator<Item = Arg<'a>>>(iter: I) -> Self {
        Self::new(iter)
    }
}
