//! Destination-size policies: plain versus "secure" (`_s`) variants.
//!
//! Both policies bound every buffer write by the slice the caller supplied.
//! The secure policy additionally requires each buffer destination to be
//! followed by an explicit [`Arg::Capacity`], and never writes past the
//! smaller of the two.

use crate::args::{Arg, ArgCursor};
use crate::error::ContractViolation;

/// How the capacity of a buffer destination is established.
pub trait DestinationPolicy {
    /// True for the `_s` variants.
    const SECURE: bool;

    /// Effective capacity of a buffer of `len` elements for conversion
    /// number `index`, taking the paired capacity argument when required.
    fn buffer_capacity(
        &self,
        args: &mut ArgCursor<'_>,
        index: usize,
        len: usize,
    ) -> Result<usize, ContractViolation>;

    /// Consumes whatever the policy pairs with a `%n` destination.
    fn count_capacity(&self, args: &mut ArgCursor<'_>, index: usize) -> Result<(), ContractViolation>;
}

/// Plain variants: the slice length is the capacity.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unchecked;

impl DestinationPolicy for Unchecked {
    const SECURE: bool = false;

    fn buffer_capacity(
        &self,
        _args: &mut ArgCursor<'_>,
        _index: usize,
        len: usize,
    ) -> Result<usize, ContractViolation> {
        Ok(len)
    }

    fn count_capacity(&self, _args: &mut ArgCursor<'_>, _index: usize) -> Result<(), ContractViolation> {
        Ok(())
    }
}

/// Secure variants: a nonzero [`Arg::Capacity`] must follow the buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Checked;

impl Checked {
    fn declared(args: &mut ArgCursor<'_>, index: usize) -> Result<usize, ContractViolation> {
        match args.next_arg() {
            Some(Arg::Capacity(0)) => Err(ContractViolation::ZeroCapacity { index }),
            Some(Arg::Capacity(capacity)) => Ok(capacity),
            _ => Err(ContractViolation::MissingCapacity { index }),
        }
    }
}

impl DestinationPolicy for Checked {
    const SECURE: bool = true;

    fn buffer_capacity(
        &self,
        args: &mut ArgCursor<'_>,
        index: usize,
        len: usize,
    ) -> Result<usize, ContractViolation> {
        Self::declared(args, index).map(|declared| declared.min(len))
    }

    fn count_capacity(&self, args: &mut ArgCursor<'_>, index: usize) -> Result<(), ContractViolation> {
        Self::declared(args, index).map(drop)
    }
}
