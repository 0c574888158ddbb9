//! Tests for the generation progress bar

#[cfg(test)]
mod tests {
    use wfc_mosaic::io::progress::ProgressManager;

    // Tests the bar follows the collapsed count
    // Verified by reporting the step count as the position
    #[test]
    fn test_update_sets_position() {
        let pm = ProgressManager::new(16);
        pm.start_pass("generate");
        pm.update(5, 12);
        assert_eq!(pm.position(), 5);
        pm.finish("done");
    }

    // Tests a new pass starts from zero
    // Verified by keeping the previous position in start_pass
    #[test]
    fn test_start_pass_resets_position() {
        let pm = ProgressManager::new(9);
        pm.update(9, 30);
        pm.start_pass("scroll 1/1");
        assert_eq!(pm.position(), 0);
        pm.finish("0 deadends");
    }
}
