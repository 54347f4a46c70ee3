use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use log::info;

use crate::error::PrintError;

pub const FIT_TO_PAGE: &str = "fit-to-page";

#[derive(Debug)]
pub struct Lpr {
    program: String,
    cmd: Command,
}

impl Lpr {
    pub fn cmd(self) -> Command {
        self.cmd
    }

    pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Lpr {
        self.cmd.arg(arg);
        self
    }

    pub fn printer(&mut self, name: &str) -> &mut Lpr {
        self.arg("-P").arg(name)
    }

    pub fn option(&mut self, option: &str) -> &mut Lpr {
        self.arg("-o").arg(option)
    }

    pub fn run(&mut self) -> Result<(), PrintError> {
        info!("Running {:?}", self.cmd);
        let status = self.cmd.status().map_err(|source| PrintError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(PrintError::Exit {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

pub fn create_lpr_command(program: &str) -> Lpr {
    Lpr {
        program: program.to_string(),
        cmd: Command::new(program),
    }
}

/// `lpr -P <printer> -o fit-to-page <path>`
pub fn print_file(program: &str, printer: &str, path: &Path) -> Result<(), PrintError> {
    create_lpr_command(program)
        .printer(printer)
        .option(FIT_TO_PAGE)
        .arg(path)
        .run()
}
