/*! Source formats.

Readers and typed models for the raw dictionary dumps the compiler consumes.
!*/
pub mod kaikki;
