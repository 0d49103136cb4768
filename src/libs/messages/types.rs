//! Message type definitions.
//!
//! Variants are grouped by the part of the application that emits them.
//! Parameters carry the dynamic context interpolated by the `Display`
//! implementation.

#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigInvalid(String), // reason
    ConfigModuleEngine,
    ConfigModuleDisplay,
    ConfigHeader,

    // === TRACKER MESSAGES ===
    WatchStarted,
    WatchStopped,
    WatchDurationElapsed(f64), // seconds
    WatchInvalidDuration(f64), // seconds
    WatchReceivedCtrlC,
    WatchReceivedSigterm,
    SessionStarted(String), // HH:MM:SS
    StatusBecameActive(String), // window label
    StatusBecameInactive(String), // HH:MM:SS of total active time so far
    LedgerLabelDropped(String), // window label
    InputModeSelected(String), // mode

    // === COLLABORATOR MESSAGES ===
    InputSourceUnavailable(String), // reason
    InputListenerError(String),     // error
    InputChannelClosed,
    WindowResolutionFailed(String), // reason

    // === DASHBOARD MESSAGES ===
    DashboardHeader,
    DashboardTypingTime,
    DashboardClicks,
    DashboardEfficiency,
    DashboardActiveTime,
    DashboardInactiveTime,
    DashboardStatus,
    DashboardCurrentProgram,
    DashboardMostActiveProgram,
    DashboardKeysPerMinute,
    DashboardClicksPerMinute,
    DashboardSessionStart,
    DashboardProgramsHeader,
    DashboardHistogramHeader,
    DashboardNoActivity,
    FinalSummaryHeader,

    // === PROMPTS ===
    PromptSelectModules,
    PromptInactivityThreshold,
    PromptLedgerCapacity,
    PromptPollInterval,
    PromptRefreshInterval,
    PromptTopWindows,
    PromptInputMode,
}
