//! # Core Models Module
//!
//! Data types describing contacts between atoms of a trajectory.
//!
//! ## Key Components
//!
//! - [`label`] - The five-field atom label `chain:resname:resid:name:index`
//! - [`contact`] - Raw contacts, interaction type codes and classified output rows
//! - [`structure`] - A frame-indexed coordinate store implementing
//!   [`StructureSource`](crate::core::io::traits::StructureSource)
//!
//! ## Usage
//!
//! ```ignore
//! use mdcontacts::core::models::contact::Contact;
//!
//! let contact = Contact::hbond(0, "A:SER:4:OG:30".parse()?, "W:TIP3:1:OH2:900".parse()?);
//! assert!(contact.atom2.is_solvent("TIP3"));
//! ```

pub mod contact;
pub mod label;
pub mod structure;
