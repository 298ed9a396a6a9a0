//! Interactive encrypt/decrypt loop.

use crate::output;
use crate::prompt::trim_newline;
use anyhow::{Context, Result};
use sealpack::Pipeline;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use zeroize::Zeroizing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Encrypt,
    Decrypt,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Encrypt),
            "2" => Some(Self::Decrypt),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// What the user asked to process.
struct Request {
    input: PathBuf,
    output_dir: PathBuf,
    password: Zeroizing<String>,
}

pub struct Menu<R, W> {
    input: R,
    out: W,
    pipeline: Pipeline,
    hidden_password: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, out: W, pipeline: Pipeline) -> Self {
        Self {
            input,
            out,
            pipeline,
            hidden_password: false,
        }
    }

    /// Ask for passwords on the terminal without echo instead of reading
    /// them from the input.
    pub fn hidden_password(mut self, hidden: bool) -> Self {
        self.hidden_password = hidden;
        self
    }

    /// Runs until the user exits or the input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "=== sealpack: file encryption tool ===")?;
        writeln!(self.out, "1. Encrypt a file")?;
        writeln!(self.out, "2. Decrypt a file")?;
        writeln!(self.out, "3. Exit")?;

        while let ControlFlow::Continue(()) = self.step()? {}
        Ok(())
    }

    fn step(&mut self) -> Result<ControlFlow<()>> {
        let Some(line) = self.ask("\nChoose an option (1-3): ")? else {
            return Ok(ControlFlow::Break(()));
        };

        match Choice::parse(&line) {
            Some(Choice::Encrypt) => self.encrypt(),
            Some(Choice::Decrypt) => self.decrypt(),
            Some(Choice::Exit) => {
                writeln!(self.out, "Exiting.")?;
                Ok(ControlFlow::Break(()))
            }
            None => {
                writeln!(self.out, "Invalid choice. Enter a number from 1 to 3.")?;
                Ok(ControlFlow::Continue(()))
            }
        }
    }

    fn encrypt(&mut self) -> Result<ControlFlow<()>> {
        let Some(req) = self.request("Path of the file to encrypt: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        match self
            .pipeline
            .encrypt_file(&req.input, &req.output_dir, &req.password)
        {
            Ok(report) => output::write_sealed(&mut self.out, &report)?,
            Err(e) => writeln!(self.out, "error: {e}")?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn decrypt(&mut self) -> Result<ControlFlow<()>> {
        let Some(req) = self.request("Path of the file to decrypt: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        match self
            .pipeline
            .decrypt_file(&req.input, &req.output_dir, &req.password)
        {
            Ok(report) => output::write_opened(&mut self.out, &report)?,
            Err(e) => writeln!(self.out, "error: {e}")?,
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Input path, output directory and password, in that order.
    fn request(&mut self, input_prompt: &str) -> Result<Option<Request>> {
        let Some(input) = self.ask(input_prompt)? else {
            return Ok(None);
        };
        let Some(output_dir) = self.ask("Output directory: ")? else {
            return Ok(None);
        };
        let Some(password) = self.ask_password()? else {
            return Ok(None);
        };

        Ok(Some(Request {
            input: PathBuf::from(input.trim()),
            output_dir: PathBuf::from(output_dir.trim()),
            password,
        }))
    }

    /// Prints `prompt` and reads one line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if n == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        trim_newline(&mut line);
        Ok(Some(line))
    }

    fn ask_password(&mut self) -> Result<Option<Zeroizing<String>>> {
        if self.hidden_password {
            self.out.flush()?;
            let pw = rpassword::prompt_password("Password: ").context("failed to read password")?;
            return Ok(Some(Zeroizing::new(pw)));
        }

        write!(self.out, "Password: ")?;
        self.out.flush()?;

        let mut pw = Zeroizing::new(String::new());
        let n = self
            .input
            .read_line(&mut pw)
            .context("failed to read password")?;
        if n == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        trim_newline(&mut pw);
        Ok(Some(pw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run_menu(script: &str) -> String {
        let mut out = Vec::new();
        Menu::new(Cursor::new(script.as_bytes()), &mut out, Pipeline::new())
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn choices_parse() {
        assert_eq!(Choice::parse(" 1 "), Some(Choice::Encrypt));
        assert_eq!(Choice::parse("2"), Some(Choice::Decrypt));
        assert_eq!(Choice::parse("3"), Some(Choice::Exit));
        assert_eq!(Choice::parse("4"), None);
        assert_eq!(Choice::parse(""), None);
    }

    #[test]
    fn exit_stops_the_loop() {
        let out = run_menu("3\n1\n");
        assert!(out.contains("Exiting."));
        assert!(!out.contains("Path of the file"));
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let out = run_menu("");
        assert!(out.contains("Choose an option"));
    }

    #[test]
    fn invalid_choice_reprompts() {
        let out = run_menu("9\nabc\n3\n");
        assert_eq!(out.matches("Invalid choice").count(), 2);
        assert!(out.contains("Exiting."));
    }

    #[test]
    fn encrypt_then_decrypt_through_the_menu() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        fs::write(&input, b"menu driven").unwrap();
        let sealed_dir = dir.path().join("sealed");
        let opened_dir = dir.path().join("opened");

        let script = format!(
            "1\n{}\n{}\npw\n2\n{}\n{}\npw\n3\n",
            input.display(),
            sealed_dir.display(),
            sealed_dir.join("notes.txt.compressed").display(),
            opened_dir.display(),
        );
        let out = run_menu(&script);

        assert!(out.contains("Compressed and encrypted"));
        assert!(out.contains("Decrypted and decompressed"));
        assert_eq!(fs::read(opened_dir.join("notes.txt")).unwrap(), b"menu driven");
    }

    #[test]
    fn errors_are_reported_and_the_loop_continues() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let script = format!("1\n{}\n{}\npw\n3\n", missing.display(), dir.path().display());
        let out = run_menu(&script);

        assert!(out.contains("error: file not found"));
        assert!(out.contains("Exiting."));
    }

    #[test]
    fn wrong_password_is_reported() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("a.txt");
        fs::write(&input, b"x").unwrap();
        let sealed = sealpack::encrypt_file(&input, dir.path(), "right").unwrap();

        let script = format!(
            "2\n{}\n{}\nwrong\n3\n",
            sealed.path().display(),
            dir.path().join("out").display()
        );
        let out = run_menu(&script);

        assert!(out.contains("wrong password or corrupted file"));
        assert!(out.contains("Exiting."));
    }

    #[test]
    fn empty_password_is_allowed() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("e.txt");
        fs::write(&input, b"no password").unwrap();

        let script = format!("1\n{}\n{}\n\n3\n", input.display(), dir.path().display());
        let out = run_menu(&script);
        assert!(out.contains("Compressed and encrypted"));

        let opened = sealpack::decrypt_file(
            &dir.path().join("e.txt.compressed"),
            &dir.path().join("out"),
            "",
        )
        .unwrap();
        assert_eq!(fs::read(opened.path()).unwrap(), b"no password");
    }
}
