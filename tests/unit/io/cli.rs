//! Tests for command-line parsing, validation and the end-to-end runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::path::{Path, PathBuf};
    use wfc_mosaic::io::cli::{Cli, GenerationConfig, MosaicRunner, Pin};
    use wfc_mosaic::io::configuration::{
        DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_SEED, DEFAULT_TILE_PIXELS,
    };
    use wfc_mosaic::{MosaicError, ShiftDirection};

    /// Two plain tiles, red and green, four pixels each
    fn write_sheet(dir: &Path) -> PathBuf {
        let path = dir.join("sheet.png");
        let mut sheet = RgbaImage::from_pixel(8, 4, Rgba([255, 0, 0, 255]));
        for y in 0..4 {
            for x in 4..8 {
                sheet.put_pixel(x, y, Rgba([0, 255, 0, 255]));
            }
        }
        sheet.save(&path).expect("save sheet");
        path
    }

    // Tests CLI parsing with only the sheet argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "tiles.png"]);

        assert_eq!(cli.sheet, PathBuf::from("tiles.png"));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.width, DEFAULT_GRID_WIDTH);
        assert_eq!(cli.height, DEFAULT_GRID_HEIGHT);
        assert_eq!(cli.tile_pixels, DEFAULT_TILE_PIXELS);
        assert!(cli.pins.is_empty());
        assert!(cli.output.is_none());
        assert!(!cli.visualize);
        assert!(!cli.quiet);
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with all available arguments
    // Verified by modifying the pin parser to ensure it is invoked
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "tiles.png",
            "--sheet-rows",
            "2",
            "--sheet-cols",
            "3",
            "--tile-pixels",
            "16",
            "-W",
            "20",
            "-H",
            "10",
            "--seed",
            "7",
            "--pin",
            "1,2,3",
            "--pin",
            "0,0,5",
            "--scroll-down",
            "2",
            "--scroll-up",
            "1",
            "--output",
            "out/m.png",
            "--visualize",
            "--frame-interval",
            "9",
            "--quiet",
        ]);

        assert_eq!((cli.sheet_rows, cli.sheet_cols, cli.tile_pixels), (2, 3, 16));
        assert_eq!((cli.width, cli.height, cli.seed), (20, 10, 7));
        assert_eq!(
            cli.pins,
            vec![Pin { y: 1, x: 2, tile: 3 }, Pin { y: 0, x: 0, tile: 5 }]
        );
        assert_eq!((cli.scroll_down, cli.scroll_up), (2, 1));
        assert_eq!(cli.output, Some(PathBuf::from("out/m.png")));
        assert!(cli.visualize);
        assert_eq!(cli.frame_interval, 9);
        assert!(!cli.should_show_progress());
    }

    // Tests pin parsing accepts spaces and rejects malformed input
    // Verified by accepting two-field pins
    #[test]
    fn test_pin_from_str() {
        assert_eq!("4, 5, 6".parse::<Pin>(), Ok(Pin { y: 4, x: 5, tile: 6 }));
        assert!("4,5".parse::<Pin>().is_err());
        assert!("4,5,6,7".parse::<Pin>().is_err());
        assert!("a,5,6".parse::<Pin>().is_err());
        assert!(Cli::try_parse_from(["program", "s.png", "--pin", "1,x,2"]).is_err());
    }

    // Tests scroll passes run downward first
    // Verified by chaining upward scrolls first
    #[test]
    fn test_config_scroll_order() {
        let cli = Cli::parse_from(["program", "s.png", "--scroll-down", "2", "--scroll-up", "1"]);
        let config = GenerationConfig::from_cli(&cli).expect("valid config");

        assert_eq!(
            config.scrolls,
            vec![
                ShiftDirection::Down,
                ShiftDirection::Down,
                ShiftDirection::Up
            ]
        );
        assert_eq!(config.layout.tile_pixels, DEFAULT_TILE_PIXELS);
    }

    // Tests grid dimensions are validated
    // Verified by removing the zero check
    #[test]
    fn test_config_rejects_bad_dimensions() {
        let zero = Cli::parse_from(["program", "s.png", "-W", "0"]);
        assert!(matches!(
            GenerationConfig::from_cli(&zero),
            Err(MosaicError::InvalidParameter {
                parameter: "width",
                ..
            })
        ));

        let huge = Cli::parse_from(["program", "s.png", "-H", "1000000"]);
        assert!(matches!(
            GenerationConfig::from_cli(&huge),
            Err(MosaicError::InvalidParameter {
                parameter: "height",
                ..
            })
        ));
    }

    // Tests pins outside the grid are rejected before decoding
    // Verified by comparing pins against the wrong dimension
    #[test]
    fn test_config_rejects_pin_outside_grid() {
        let cli = Cli::parse_from(["program", "s.png", "-W", "3", "-H", "2", "--pin", "2,0,0"]);
        assert!(matches!(
            GenerationConfig::from_cli(&cli),
            Err(MosaicError::InvalidParameter {
                parameter: "pin",
                ..
            })
        ));
    }

    // Tests output path naming
    // Verified by dropping the suffix
    #[test]
    fn test_get_output_path() {
        let path = MosaicRunner::get_output_path(Path::new("sheets/knots.png"), "png");
        assert_eq!(path, PathBuf::from("sheets/knots_mosaic.png"));

        let bare = MosaicRunner::get_output_path(Path::new("knots.png"), "gif");
        assert_eq!(bare, PathBuf::from("knots_mosaic.gif"));
    }

    // Tests a full run writes the mosaic and the animation
    // Verified by skipping the scroll passes
    #[test]
    fn test_process_end_to_end() {
        let dir = tempfile::tempdir().expect("temp dir");
        let sheet = write_sheet(dir.path()).to_string_lossy().into_owned();
        let output = dir.path().join("out").join("mosaic.png");
        let output_arg = output.to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "program",
            sheet.as_str(),
            "--sheet-rows",
            "1",
            "--sheet-cols",
            "2",
            "--tile-pixels",
            "4",
            "-W",
            "5",
            "-H",
            "3",
            "--pin",
            "1,1,2",
            "--scroll-down",
            "2",
            "-o",
            output_arg.as_str(),
            "--visualize",
            "--quiet",
        ]);

        let summary = MosaicRunner::new(cli).process().expect("run succeeds");

        assert_eq!(summary.deadends, 0);
        assert!(summary.collapses >= 2);
        let mosaic = image::open(&output).expect("mosaic written").to_rgba8();
        assert_eq!(mosaic.dimensions(), (20, 12));
        assert!(output.with_extension("gif").exists());
        for index in 1..=2 {
            assert!(MosaicRunner::get_scroll_path(&output, index).exists());
        }
    }

    // Tests scroll frames are numbered next to the output
    // Verified by dropping the zero padding
    #[test]
    fn test_get_scroll_path() {
        let path = MosaicRunner::get_scroll_path(Path::new("out/knots_mosaic.png"), 7);
        assert_eq!(path, PathBuf::from("out/knots_mosaic_007.png"));
    }

    // Tests a pin naming a missing tile fails the run
    // Verified by ignoring set_cell errors
    #[test]
    fn test_process_rejects_unknown_tile() {
        let dir = tempfile::tempdir().expect("temp dir");
        let sheet = write_sheet(dir.path()).to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "program",
            sheet.as_str(),
            "--sheet-rows",
            "1",
            "--sheet-cols",
            "2",
            "--tile-pixels",
            "4",
            "--pin",
            "0,0,9",
            "-q",
        ]);

        let result = MosaicRunner::new(cli).process();
        assert!(matches!(
            result,
            Err(MosaicError::IndexOutOfRange { what: "tile", .. })
        ));
    }
}
