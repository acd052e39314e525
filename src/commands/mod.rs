/// Deploy workflow
pub mod deploy;
/// Restore command functionality
pub mod restore;
/// Backup, console, tail, cache shell and passthrough commands
pub mod shell;
