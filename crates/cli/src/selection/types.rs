use microgen_core::actions::GenerateAction;

/// Result of the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionChoice {
    Action(GenerateAction),
    Quit,
}

/// Result of the model menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice {
    Model(String),
    Quit,
}
