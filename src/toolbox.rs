use crate::model::NodeType;

/// One draggable entry of the node palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolboxEntry {
    pub node_type: NodeType,
    pub sub_type: &'static str,
    pub label: &'static str,
    /// Identifier of the glyph the renderer draws for this node kind.
    pub icon: &'static str,
    pub tooltip: &'static str,
}

/// Master macro to define the static palette, grouped by node type.
macro_rules! define_toolbox {
    (
        $( $node_type:ident {
            $( ($sub_type:expr, $label:expr, $icon:expr, $tooltip:expr) ),* $(,)?
        } ),* $(,)?
    ) => {
        static TOOLBOX: &[ToolboxEntry] = &[
            $( $(
                ToolboxEntry {
                    node_type: NodeType::$node_type,
                    sub_type: $sub_type,
                    label: $label,
                    icon: $icon,
                    tooltip: $tooltip,
                },
            )* )*
        ];
    };
}

define_toolbox! {
    Start {
        ("start", "Start", "play-circle", "Entry point of the flow"),
    },
    Listen {
        ("play_audio", "Play Audio", "volume-2", "Play a prompt or recording to the caller"),
        ("collect_input", "Collect Input", "hash", "Collect DTMF digits from the caller"),
        ("speech_capture", "Capture Speech", "mic", "Record and transcribe the caller's answer"),
    },
    Branch {
        ("condition", "Condition", "git-branch", "Route the call by evaluating expressions"),
        ("menu", "Menu", "list", "Offer the caller a list of options"),
    },
    AiAgent {
        ("llm_prompt", "LLM Prompt", "sparkles", "Let a language model respond to the caller"),
        ("intent_classifier", "Intent Classifier", "brain", "Detect the caller's intent"),
    },
    Logic {
        ("set_variable", "Set Variable", "variable", "Store a value for later steps"),
        ("wait", "Wait", "clock", "Pause before continuing"),
    },
    Action {
        ("api_call", "API Call", "globe", "Invoke an external API"),
        ("transfer", "Transfer", "phone-forwarded", "Transfer the call to an agent or number"),
        ("send_sms", "Send SMS", "message-square", "Send a text message to the caller"),
        ("hangup", "Hang Up", "phone-off", "End the call"),
    },
    Data {
        ("extract", "Extract Data", "file-search", "Extract structured fields from a conversation"),
        ("lookup", "Lookup", "database", "Fetch a record from a data source"),
    },
}

/// Every palette entry, grouped by node type in declaration order.
pub fn entries() -> &'static [ToolboxEntry] {
    TOOLBOX
}

pub fn entries_for(node_type: NodeType) -> impl Iterator<Item = &'static ToolboxEntry> {
    TOOLBOX.iter().filter(move |e| e.node_type == node_type)
}

pub fn lookup(node_type: NodeType, sub_type: &str) -> Option<&'static ToolboxEntry> {
    TOOLBOX
        .iter()
        .find(|e| e.node_type == node_type && e.sub_type == sub_type)
}

/// Label given to a freshly created node. Unregistered subtypes get the type's display name.
pub fn default_label(node_type: NodeType, sub_type: &str) -> String {
    lookup(node_type, sub_type)
        .map(|e| e.label)
        .unwrap_or_else(|| node_type.display_name())
        .to_string()
}
