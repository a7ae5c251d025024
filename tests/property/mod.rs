//! Property-based tests for the rdcli client
