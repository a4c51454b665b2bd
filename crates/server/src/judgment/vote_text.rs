//! Vote-text composition engine.
//!
//! Pure and deterministic: given the knowledge type, the preliminary
//! outcome and the selected template fragments, produce the vote text.
//! Never errors: illegal combinations compose to the empty string and are
//! rejected by the caller's pre-validation, not here.

use shared_types::{KnowledgeType, PreliminaryOutcome};

/// The two text variants of a preliminary template.
#[derive(Debug, Clone, Copy)]
pub struct PreliminaryFragments<'a> {
    pub accept_text: &'a str,
    pub reject_text: &'a str,
}

/// Fixed literal for a vote that rejects the preliminary objection without
/// any template: rejecting the objection is itself the path to substantive
/// review.
const REJECT_LITERAL: &str = "Conhecer do recurso.";

/// Fixed opening for an ex-officio directive with no preliminary fragment.
const NON_KNOWLEDGE_OPENING: &str = "Não conhecer do recurso";

/// Connective between the main pronouncement and the ex-officio directive.
const OFFICIAL_CONNECTIVE: &str = ", mas, de ofício, ";

/// Normalize a template fragment before composition: trim whitespace,
/// strip one trailing period, then fix the case of the first character:
/// upper when the fragment opens the sentence, lower otherwise.
fn normalize(fragment: &str, opens_sentence: bool) -> String {
    let trimmed = fragment.trim();
    let stripped = trimmed.strip_suffix('.').unwrap_or(trimmed);

    let mut chars = stripped.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let rest = chars.as_str();
            let head: String = if opens_sentence {
                first.to_uppercase().collect()
            } else {
                first.to_lowercase().collect()
            };
            format!("{}{}", head, rest)
        }
    }
}

/// Compose the vote text from structured choices.
///
/// The official fragment is consulted only when the outcome permits an
/// ex-officio directive: a rejected preliminary never carries one, and the
/// caller enforces that before getting here.
pub fn compose(
    knowledge_type: KnowledgeType,
    preliminary_outcome: Option<PreliminaryOutcome>,
    preliminary: Option<PreliminaryFragments<'_>>,
    merit_text: Option<&str>,
    official_text: Option<&str>,
) -> String {
    match knowledge_type {
        KnowledgeType::NonKnowledge => {
            let preliminary_text = match (preliminary, preliminary_outcome) {
                (Some(p), Some(PreliminaryOutcome::Accept)) => Some(p.accept_text),
                (Some(p), Some(PreliminaryOutcome::Reject)) => Some(p.reject_text),
                _ => None,
            };
            let official = match preliminary_outcome {
                Some(PreliminaryOutcome::Accept) => official_text,
                _ => None,
            };
            match (preliminary_text, official) {
                (Some(p), None) => format!("{}.", normalize(p, true)),
                (Some(p), Some(o)) => format!(
                    "{}{}{}.",
                    normalize(p, true),
                    OFFICIAL_CONNECTIVE,
                    normalize(o, false)
                ),
                (None, Some(o)) => format!(
                    "{}{}{}.",
                    NON_KNOWLEDGE_OPENING,
                    OFFICIAL_CONNECTIVE,
                    normalize(o, false)
                ),
                (None, None) => match preliminary_outcome {
                    Some(PreliminaryOutcome::Reject) => REJECT_LITERAL.to_string(),
                    _ => String::new(),
                },
            }
        }
        KnowledgeType::Knowledge => match (merit_text, official_text) {
            (Some(m), None) => format!("{}.", normalize(m, true)),
            (Some(m), Some(o)) => format!(
                "{}{}{}.",
                normalize(m, true),
                OFFICIAL_CONNECTIVE,
                normalize(o, false)
            ),
            (None, _) => String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preliminary() -> PreliminaryFragments<'static> {
        PreliminaryFragments {
            accept_text: "Acolher a preliminar de intempestividade.",
            reject_text: "Rejeitar a preliminar de intempestividade.",
        }
    }

    #[test]
    fn preliminary_only_ends_with_single_period_and_no_official_clause() {
        let text = compose(
            KnowledgeType::NonKnowledge,
            Some(PreliminaryOutcome::Accept),
            Some(preliminary()),
            None,
            None,
        );
        assert_eq!(text, "Acolher a preliminar de intempestividade.");
        assert!(text.ends_with('.'));
        assert!(!text.ends_with(".."));
        assert!(!text.contains("de ofício"));
    }

    #[test]
    fn preliminary_with_official_joins_with_connective() {
        let text = compose(
            KnowledgeType::NonKnowledge,
            Some(PreliminaryOutcome::Accept),
            Some(preliminary()),
            None,
            Some("Determinar o recálculo do lançamento."),
        );
        assert_eq!(
            text,
            "Acolher a preliminar de intempestividade, mas, de ofício, \
             determinar o recálculo do lançamento."
        );
        assert_eq!(text.matches(", mas, de ofício, ").count(), 1);
    }

    #[test]
    fn official_fragment_is_lower_cased_even_when_template_starts_upper() {
        let text = compose(
            KnowledgeType::Knowledge,
            None,
            None,
            Some("Negar provimento ao recurso."),
            Some("Cancelar a multa moratória."),
        );
        assert_eq!(
            text,
            "Negar provimento ao recurso, mas, de ofício, cancelar a multa moratória."
        );
    }

    #[test]
    fn official_without_preliminary_uses_fixed_opening() {
        let text = compose(
            KnowledgeType::NonKnowledge,
            Some(PreliminaryOutcome::Accept),
            None,
            None,
            Some("determinar a baixa do débito"),
        );
        assert_eq!(
            text,
            "Não conhecer do recurso, mas, de ofício, determinar a baixa do débito."
        );
    }

    #[test]
    fn rejected_preliminary_without_template_is_the_fixed_literal() {
        let text = compose(
            KnowledgeType::NonKnowledge,
            Some(PreliminaryOutcome::Reject),
            None,
            None,
            None,
        );
        assert_eq!(text, "Conhecer do recurso.");
    }

    #[test]
    fn rejected_preliminary_with_template_uses_reject_variant() {
        let text = compose(
            KnowledgeType::NonKnowledge,
            Some(PreliminaryOutcome::Reject),
            Some(preliminary()),
            None,
            None,
        );
        assert_eq!(text, "Rejeitar a preliminar de intempestividade.");
    }

    #[test]
    fn official_is_ignored_when_preliminary_outcome_is_reject() {
        let text = compose(
            KnowledgeType::NonKnowledge,
            Some(PreliminaryOutcome::Reject),
            Some(preliminary()),
            None,
            Some("Cancelar a multa."),
        );
        assert_eq!(text, "Rejeitar a preliminar de intempestividade.");
    }

    #[test]
    fn merit_only_is_sentence_cased_with_single_period() {
        let text = compose(
            KnowledgeType::Knowledge,
            None,
            None,
            Some("dar provimento parcial ao recurso"),
            None,
        );
        assert_eq!(text, "Dar provimento parcial ao recurso.");
    }

    #[test]
    fn knowledge_without_merit_composes_empty() {
        let text = compose(KnowledgeType::Knowledge, None, None, None, Some("Cancelar."));
        assert_eq!(text, "");
    }

    #[test]
    fn accept_without_any_template_composes_empty() {
        let text = compose(
            KnowledgeType::NonKnowledge,
            Some(PreliminaryOutcome::Accept),
            None,
            None,
            None,
        );
        assert_eq!(text, "");
    }

    #[test]
    fn composition_is_deterministic() {
        let run = || {
            compose(
                KnowledgeType::Knowledge,
                None,
                None,
                Some("  Dar provimento ao recurso.  "),
                Some("  Retificar o valor venal.  "),
            )
        };
        assert_eq!(run(), run());
        assert_eq!(
            run(),
            "Dar provimento ao recurso, mas, de ofício, retificar o valor venal."
        );
    }

    #[test]
    fn normalization_handles_accented_first_character() {
        let text = compose(
            KnowledgeType::Knowledge,
            None,
            None,
            Some("é de se negar provimento"),
            None,
        );
        assert_eq!(text, "É de se negar provimento.");
    }

    #[test]
    fn only_one_trailing_period_is_stripped() {
        let text = compose(
            KnowledgeType::Knowledge,
            None,
            None,
            Some("Negar provimento.."),
            None,
        );
        assert_eq!(text, "Negar provimento..");
    }
}
