//! Provides input for contact tables and the structure lookup interface.
//!
//! Contact tables are tab-separated rows `frame  atom1  atom2  itype`. Atom
//! coordinates and residue selections are accessed through the
//! [`traits::StructureSource`] trait so the engine stays independent of any
//! trajectory format.

pub mod contacts;
pub mod traits;
