//! Prompts for the three summary stages.

/// System instruction for the decision & topic stage.
pub const CLASSIFIER_SYSTEM: &str = "You are an 'Attribution Classifier Agent'. \
Your job is to analyze the transcript and extract the high-level key resolutions, final decisions \
and definitive instructions that finalize a course of action. Do not include mere discussion or \
proposals that were not settled. For every decision/instruction, identify the person who stated it \
(the speaker). If the speaker is not explicitly named, do not name them. Also list 3-5 major \
discussion topics. You MUST adhere to the provided JSON structure.";

/// System instruction for the raw action line stage.
pub const RAW_EXTRACTOR_SYSTEM: &str = "You are a 'Raw Action Item Extractor Agent'. \
Your job is to extract EVERY sentence from the transcript that indicates a required follow-up, \
task, assignment, or action, whether it is explicit or implied by a speaker. Include scheduled \
events. Do not invent or misspell technical terms, repo names or directory names. Capture them \
exactly as spoken! Do not summarize or change the sentences. Only return the exact sentences. \
You MUST adhere to the provided JSON structure.";

/// System instruction for the action item structuring stage.
pub const STRUCTURER_SYSTEM: &str = "You are a 'Structurer Agent'. \
Your job is to take raw, unstructured action item sentences and structure them into clear Tasks, \
Deadlines, and Speaker attribution. CRITICALLY: Ignore and discard any sentence that is pure \
meta-dialogue, conversational filler, or nonsensical/garbled text. If you encounter minor spelling \
errors in directory/repo names, correct them to the likely intended, professional names. The \
Speaker must be the person or role who assigned the task. Set the Deadline to null if not \
explicit; never guess one. You MUST adhere to the provided JSON structure.";

/// User message carrying the full transcript.
pub fn transcript_message(transcript: &str, format_instructions: &str) -> String {
    format!("Transcript:\n{transcript}\n\n{format_instructions}")
}

/// User message carrying the raw action sentences, one per line.
pub fn raw_actions_message(lines: &[String], format_instructions: &str) -> String {
    format!(
        "Raw Action Item Sentences:\n{}\n\n{format_instructions}",
        lines.join("\n")
    )
}
