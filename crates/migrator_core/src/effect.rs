use std::path::PathBuf;

/// Effects the confirmation driver must execute against the real world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmEffect {
    /// Launch a browser bound to `profile` and open the platform home page.
    LaunchBrowser { profile: PathBuf },
    /// Close the browser launched by the most recent `LaunchBrowser`.
    CloseBrowser,
    /// Show a prompt and feed the reply back as a message.
    Prompt(PromptKind),
}

/// Which prompt the driver should put in front of the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Ask whether the account loaded correctly; any non-yes reply is read
    /// as a replacement profile path.
    ConfirmLoaded,
    /// Ask for a valid profile directory after an unusable one.
    EnterProfile,
}
