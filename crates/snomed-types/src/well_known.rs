//! Well-known SNOMED CT identifiers for medicinal product modelling.
//!
//! These are the attribute types used to tell clinical drugs, medicinal
//! product forms and medicinal products apart in the concept model.
//!
//! # Examples
//!
//! ```
//! use snomed_types::well_known;
//!
//! assert_eq!(well_known::HAS_ACTIVE_INGREDIENT, 127489000);
//! assert_eq!(well_known::HAS_MANUFACTURED_DOSE_FORM, 411116001);
//! ```

use crate::SctId;

// =============================================================================
// Product attributes
// =============================================================================

/// Count of base of active ingredient - 1142139005.
///
/// Present on medicinal products and their more specific forms.
pub const COUNT_OF_BASE_OF_ACTIVE_INGREDIENT: SctId = 1142139005;

/// Has manufactured dose form - 411116001.
///
/// Present on medicinal product forms and clinical drugs, absent on medicinal products.
pub const HAS_MANUFACTURED_DOSE_FORM: SctId = 411116001;

/// Has basis of strength substance - 732943007.
///
/// Only clinical drugs carry strength, so generalizations must lack it.
pub const HAS_BASIS_OF_STRENGTH_SUBSTANCE: SctId = 732943007;

/// Has active ingredient - 127489000.
pub const HAS_ACTIVE_INGREDIENT: SctId = 127489000;

/// Has precise active ingredient - 762949000.
///
/// Links a clinical drug to the exact substance it contains.
pub const HAS_PRECISE_ACTIVE_INGREDIENT: SctId = 762949000;

// =============================================================================
// Substance attributes
// =============================================================================

/// Is modification of - 738774007.
///
/// Links a substance modification (salt, ester, ...) to its base substance.
pub const IS_MODIFICATION_OF: SctId = 738774007;

// =============================================================================
// Reference sets
// =============================================================================

/// Norwegian reference set of clinical drugs awaiting product mapping - 88791000202108.
pub const FAT_CLINICAL_DRUG_REFSET: SctId = 88791000202108;
