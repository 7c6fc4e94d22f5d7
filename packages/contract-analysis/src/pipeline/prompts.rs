//! LLM prompts for contract analysis.
//!
//! All prompt construction is pure string building. The analysis prompt is
//! driven by [`TierConfig`] so free and premium share one template instead
//! of two near-duplicate literals.

use crate::types::tier::Tier;

/// How much of the contract the type-detection prompt includes.
///
/// Type classification only needs the opening clauses; truncation bounds
/// token cost. The full analysis prompt is never truncated.
pub const TYPE_DETECTION_EXCERPT_CHARS: usize = 2000;

/// Base JSON shape every analysis response must mimic.
const BASE_SHAPE: &str = r#"{
  "risks": [{"risk": "Risk description", "explanation": "Brief explanation", "severity": "low|medium|high"}],
  "opportunities": [{"opportunity": "Opportunity description", "explanation": "Brief explanation", "impact": "low|medium|high"}],
  "summary": "Summary of the contract""#;

/// Additional shape requested from premium analyses.
const EXTENDED_SHAPE: &str = r#",
  "recommendations": ["Recommendation 1", "Recommendation 2"],
  "keyClauses": ["Clause 1", "Clause 2"],
  "legalCompliance": "Assessment of legal compliance",
  "negotiationPoints": ["Point 1", "Point 2"],
  "contractDuration": "Duration of the contract, if applicable",
  "terminationConditions": "Summary of termination conditions, if applicable",
  "financialTerms": {
    "description": "Overview of financial terms",
    "details": ["Detail 1", "Detail 2"]
  },
  "compensationStructure": {
    "baseSalary": "Base salary, if applicable",
    "bonuses": "Bonus arrangements, if applicable",
    "equity": "Equity grants, if applicable",
    "otherBenefits": "Other benefits, if applicable"
  },
  "performanceMetrics": ["Metric 1", "Metric 2"],
  "specificClauses": "Summary of clauses specific to this contract type""#;

const SCORE_SHAPE: &str = r#",
  "overallScore": "Overall score from 1 to 100"
}"#;

/// Build the full analysis prompt for a contract.
///
/// Embeds the numbered task list for the tier, the JSON shape template, a
/// JSON-only closing directive, and the complete contract text.
pub fn format_analysis_prompt(contract_type: &str, tier: Tier, contract_text: &str) -> String {
    let config = tier.config();

    let mut requirements = vec![
        format!(
            "A list of at least {} potential risks for the party receiving the contract, \
             each with a brief explanation and severity level (low, medium, high).",
            config.min_risks
        ),
        format!(
            "A list of at least {} potential opportunities or benefits for the receiving \
             party, each with a brief explanation and impact level (low, medium, high).",
            config.min_opportunities
        ),
    ];

    if config.include_extended_fields {
        requirements.extend(
            [
                "A comprehensive summary of the contract, including key terms and conditions.",
                "Any recommendations for improving the contract from the receiving party's perspective.",
                "A list of key clauses in the contract.",
                "An assessment of the contract's legal compliance.",
                "A list of potential negotiation points.",
                "The contract duration or term, if applicable.",
                "A summary of termination conditions, if applicable.",
                "A breakdown of any financial terms or compensation structure, if applicable.",
                "Any performance metrics or KPIs mentioned, if applicable.",
                "A summary of any specific clauses relevant to this type of contract (e.g., \
                 intellectual property for employment contracts, warranties for sales contracts).",
            ]
            .map(String::from),
        );
    } else {
        requirements.push("A brief summary of the contract.".to_string());
    }

    requirements.push(
        "An overall score from 1 to 100, with 100 being the highest. This score represents \
         the overall favorability of the contract based on the identified risks and \
         opportunities."
            .to_string(),
    );

    let mut prompt = format!("Analyze the following {contract_type} contract and provide:\n");
    for (i, requirement) in requirements.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, requirement));
    }

    prompt.push_str("\nFormat your response as a JSON object with the following structure:\n");
    prompt.push_str(BASE_SHAPE);
    if config.include_extended_fields {
        prompt.push_str(EXTENDED_SHAPE);
    }
    prompt.push_str(SCORE_SHAPE);

    prompt.push_str(
        "\n\nImportant: Provide only the JSON object in your response, without any \
         additional text or formatting.\n\nContract text:\n",
    );
    prompt.push_str(contract_text);

    prompt
}

/// Build the classify-only prompt for contract type detection.
///
/// Includes at most `excerpt_chars` characters of the contract text.
pub fn format_type_detection_prompt(contract_text: &str, excerpt_chars: usize) -> String {
    let excerpt: String = contract_text.chars().take(excerpt_chars).collect();

    format!(
        "Analyze the following contract text and determine the type of contract it is.\n\
         Provide only the contract type as a single string (e.g., \"Employment\", \
         \"Non-Disclosure Agreement\", \"Sales\", \"Lease\", etc.).\n\
         Do not include any additional explanation or text.\n\n\
         Contract text:\n{excerpt}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_contains_contract_text() {
        let prompt = format_analysis_prompt("Lease", Tier::Free, "TENANT shall pay rent monthly");
        assert!(prompt.contains("TENANT shall pay rent monthly"));
        assert!(prompt.contains("Lease contract"));
    }

    #[test]
    fn free_tier_requests_five_items() {
        let prompt = format_analysis_prompt("Sales", Tier::Free, "text");
        assert!(prompt.contains("at least 5 potential risks"));
        assert!(prompt.contains("at least 5 potential opportunities"));
        assert!(!prompt.contains("keyClauses"));
        assert!(!prompt.contains("negotiation points"));
    }

    #[test]
    fn premium_tier_requests_ten_items_and_extended_fields() {
        let prompt = format_analysis_prompt("Employment", Tier::Premium, "text");
        assert!(prompt.contains("at least 10 potential risks"));
        assert!(prompt.contains("at least 10 potential opportunities"));
        assert!(prompt.contains("keyClauses"));
        assert!(prompt.contains("compensationStructure"));
        assert!(prompt.contains("specificClauses"));
    }

    #[test]
    fn prompt_demands_json_only_output() {
        let prompt = format_analysis_prompt("Sales", Tier::Free, "text");
        assert!(prompt.contains("Provide only the JSON object"));
    }

    #[test]
    fn type_detection_prompt_truncates() {
        let long_text = "x".repeat(5000);
        let prompt = format_type_detection_prompt(&long_text, TYPE_DETECTION_EXCERPT_CHARS);
        assert!(prompt.contains(&"x".repeat(2000)));
        assert!(!prompt.contains(&"x".repeat(2001)));
    }

    #[test]
    fn type_detection_truncation_respects_char_boundaries() {
        // Multi-byte characters must not split
        let text = "é".repeat(3000);
        let prompt = format_type_detection_prompt(&text, TYPE_DETECTION_EXCERPT_CHARS);
        assert!(prompt.contains(&"é".repeat(2000)));
    }

    #[test]
    fn short_text_is_not_padded() {
        let prompt = format_type_detection_prompt("short", TYPE_DETECTION_EXCERPT_CHARS);
        assert!(prompt.ends_with("short"));
    }
}
