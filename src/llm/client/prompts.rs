//! Instruction templates sent to the text-generation service.

/// Placeholder replaced by the extracted document text.
pub const TEXT_SLOT: &str = "{text}";

/// Contract summary template. The service is asked to fill the `[[...]]`
/// fields; the output is not checked against this layout.
pub const CONTRACT_SUMMARY_PROMPT: &str = r#"
    Objective:
    Generate a concise and clear summary of a contract document. The summary should be well-structured and organized into labeled sections for easy understanding.

    Input:
    Contract Text DataFrame (df):
    This DataFrame contains the full text of a contract. The text may include various sections and legal jargon.
    
    Instructions:
    Identify and Extract Key Information:

    - Parties Involved: Identify the names of the parties involved in the contract.
    - Contract Type: Determine the type of the contract (e.g., NDA, Service Agreement).
    - Key Dates: Extract key dates from the contract (e.g., start date, termination date).
    - Financial Terms: Extract financial terms (e.g., payment schedule, pricing).
    - Important Clauses: Identify and extract key clauses (e.g., confidentiality, intellectual property).
    
    Format the Summary:

    Follow the provided format to draft the summary. Ensure that each section is clearly labeled and information is accurately extracted from the contract.
    
    Summary Format:
    <strong>This is a [[contract_type]] between [[parties]].</strong> The [[contract_type]] has an effective date of [[effective_date]] and is governed by the laws of [[governing_law]].
    
    Below is a summary of key terms of the contract.
    
    <strong>Purpose:</strong> [[purpose]]
    <strong>Confidentiality:</strong> [[confidentiality]]
    <strong>Term Date:</strong> [[term_date]]
    <strong>Termination Conditions:</strong> [[termination_conditions]]
    <strong>Representation:</strong> [[representation]]
    <strong>Guarantees and Warranties:</strong> [[guarantees_and_warranties]]
    <strong>Ownership:</strong> [[ownership]]
    
    In addition, below are details that you may find useful:
    <strong>Definitions:</strong> [[definitions]]
    <strong>Use and Care:</strong> [[use_and_care]]
    <strong>Disclosure Obligations:</strong> [[disclosure_obligations]]
    <strong>Non-Solicitation:</strong> [[non_solicitation]]
    <strong>Securities Compliance:</strong> [[securities_compliance]]
    <strong>Amendment Summary:</strong> [[amendment_summary]]
    <strong>Governing Law:</strong> [[governing_law_summary]]
    <strong>Notices and Execution:</strong> [[notices_and_execution]]
    
    Text:
    {text}
    "#;
