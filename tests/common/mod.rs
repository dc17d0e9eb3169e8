//! Common utils for integration tests
//!
//!

use copy_dir::copy_dir;
use error_stack::Result;
use fmtwalk::*;
use murmur3::murmur3_32;
use std::{
    io::BufReader,
    path::{Path, PathBuf},
};

/// Records every invocation in this file, relative to the root
pub const CALLS_LOG: &str = "calls.log";
/// The stand-in formatter shipped with every fixture
pub const FAKE_FORMATTER: &str = "sh fake-format.sh";

pub struct ItEnv {
    config: Config,
    test_description: String,
    test_dir: PathBuf,
}

impl ItEnv {
    pub fn new(test_name: &str, fixture_dir_name: &str) -> Self {
        let test_description = format!("{test_name} ({fixture_dir_name})");
        let mut read = BufReader::new(test_name.as_bytes());
        let test_dir_name = format!("test-{}", murmur3_32(&mut read, 0).unwrap());
        // create test directory
        let root_path = Path::new("target/test_out");
        if !root_path.exists() {
            std::fs::create_dir_all(root_path).unwrap();
        }
        let path = root_path.join(test_dir_name);
        if path.exists() {
            std::fs::remove_dir_all(&path).unwrap();
        }

        // copy fixture directory to test directory
        copy_dir(fixture_dir_name, &path).unwrap();

        let config = Config {
            root_dir: path.clone(),
            formatter_cmd: FAKE_FORMATTER.to_string(),
            verbosity: Verbosity::Quiet,
            ..Default::default()
        };

        Self {
            test_description,
            test_dir: path,
            config,
        }
    }

    #[inline]
    pub fn execute<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        f(self)
    }

    #[inline]
    pub fn cfg(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Run and print errors, like the binary does
    #[inline]
    pub fn run(&self) -> std::result::Result<Summary, ()> {
        fmtwalk(self.config.clone())
    }

    /// Run and keep the error report
    #[inline]
    pub fn run_report(&self) -> Result<Summary, ExecuteError> {
        Fmtwalk::run(self.config.clone())
    }

    /// Path of a file in the test directory
    #[allow(dead_code)]
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.test_dir.join(file_name)
    }

    /// The raw bytes of every formatter invocation line, in order
    #[allow(dead_code)]
    pub fn calls_raw(&self) -> Vec<Vec<u8>> {
        let path = self.test_dir.join(CALLS_LOG);
        if !path.exists() {
            return vec![];
        }
        std::fs::read(path)
            .unwrap()
            .split(|b| *b == b'\n')
            .filter(|line| !line.is_empty())
            .map(<[u8]>::to_vec)
            .collect()
    }

    /// The arguments of every formatter invocation, in order
    pub fn calls(&self) -> Vec<String> {
        let path = self.test_dir.join(CALLS_LOG);
        if !path.exists() {
            return vec![];
        }
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[inline]
    #[allow(dead_code)]
    pub fn delete_file(&self, file_name: &str) {
        let path = self.test_dir.join(file_name);
        std::fs::remove_file(&path).unwrap();
    }

    #[inline]
    #[allow(dead_code)]
    pub fn set_file(&self, file_name: &str, contents: &str) {
        let path = self.test_dir.join(file_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
    }

    pub fn assert_calls(&self, expected: &[&str]) {
        assert_eq!(
            self.calls(),
            expected,
            "formatter calls differ in test `{}` ({})",
            self.test_description,
            self.test_dir.display()
        );
    }

    pub fn assert_units(&self, summary: &Summary, expected: &[(&str, &str)]) {
        let actual = summary
            .units
            .iter()
            .map(|u| (u.rel_dir(), u.ext.clone()))
            .collect::<Vec<_>>();
        let expected = expected
            .iter()
            .map(|(d, e)| (d.to_string(), e.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(
            actual,
            expected,
            "units differ in test `{}` ({})",
            self.test_description,
            self.test_dir.display()
        );
    }
}

macro_rules! testit {
    ($test_name:ident, $fixture:literal, $fnonce:expr) => {
        #[test]
        fn $test_name() {
            let mut env = ItEnv::new(
                stringify!($test_name),
                concat!("tests/fixtures/", $fixture),
            );
            env.execute($fnonce);
        }
    };
}

pub(crate) use testit;
