//! Constraint expressions selecting MPF and MP generalizations.
//!
//! Both target types share the same two query shapes and differ only in
//! their defining attribute signature:
//!
//! | Attribute | MPF | MP |
//! |-----------|-----|----|
//! | count of base of active ingredient | present | present |
//! | has manufactured dose form | present | absent |
//! | has basis of strength substance | absent | absent |

use snomed_types::ecl::{Attribute, EclExpression};
use snomed_types::well_known::{
    COUNT_OF_BASE_OF_ACTIVE_INGREDIENT, HAS_ACTIVE_INGREDIENT, HAS_BASIS_OF_STRENGTH_SUBSTANCE,
    HAS_MANUFACTURED_DOSE_FORM, HAS_PRECISE_ACTIVE_INGREDIENT, IS_MODIFICATION_OF,
};
use snomed_types::{ClinicalDrugId, TargetType};

/// Attribute signature that identifies concepts of the target type.
pub fn defining_refinement(target: TargetType) -> Vec<Attribute> {
    let dose_form = match target {
        TargetType::Mpf => Attribute::any(HAS_MANUFACTURED_DOSE_FORM),
        TargetType::Mp => Attribute::absent(HAS_MANUFACTURED_DOSE_FORM),
    };
    vec![
        Attribute::any(COUNT_OF_BASE_OF_ACTIVE_INGREDIENT),
        dose_form,
        Attribute::absent(HAS_BASIS_OF_STRENGTH_SUBSTANCE),
    ]
}

/// Ancestors of the clinical drug carrying the target type's signature.
pub fn simple_expression(target: TargetType, clinical_drug: &ClinicalDrugId) -> EclExpression {
    EclExpression::concept(clinical_drug)
        .ancestors()
        .refine(defining_refinement(target))
}

/// Base substances of the clinical drug's precise active ingredients.
///
/// Follows "is modification of" up to two levels from each precise active
/// ingredient and keeps only substances that are not themselves modifications.
pub fn substance_lineage(clinical_drug: &ClinicalDrugId) -> EclExpression {
    let precise = EclExpression::concept(clinical_drug)
        .dot(HAS_PRECISE_ACTIVE_INGREDIENT)
        .nested();
    let modified_once = precise.clone().dot(IS_MODIFICATION_OF).nested();
    let modified_twice = modified_once.clone().dot(IS_MODIFICATION_OF).nested();

    EclExpression::any_of(vec![precise, modified_once, modified_twice])
        .nested()
        .refine(vec![Attribute::absent(IS_MODIFICATION_OF)])
        .nested()
}

/// The simple expression narrowed to candidates whose active ingredients are
/// base substances of the clinical drug.
pub fn escalated_expression(target: TargetType, clinical_drug: &ClinicalDrugId) -> EclExpression {
    let mut refinement = defining_refinement(target);
    refinement.push(Attribute::matching(
        HAS_ACTIVE_INGREDIENT,
        substance_lineage(clinical_drug),
    ));

    EclExpression::concept(clinical_drug)
        .ancestors()
        .refine(refinement)
}
