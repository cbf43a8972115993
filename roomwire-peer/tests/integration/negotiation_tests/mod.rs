mod test_capture_failure_stalls_session;
