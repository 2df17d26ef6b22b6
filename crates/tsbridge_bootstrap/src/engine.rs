//! Embedded script engine
//!
//! One QuickJS runtime per child process. The script's argument vector is
//! injected at construction time as `process.argv`, so there is no window
//! between setting arguments and loading the script. A `process.exit` hook
//! records the code the script reports.

use rquickjs::function::Opt;
use rquickjs::{Array, Context, Function, Object, Runtime};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read script {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("script threw: {0}")]
    Script(String),
    #[error("script engine error")]
    Engine(#[from] rquickjs::Error),
}

/// Script execution context
pub struct ScriptEngine {
    #[allow(dead_code)] // Kept alive for context lifetime
    runtime: Runtime,
    context: Context,
    exit_code: Rc<Cell<Option<i32>>>,
}

impl ScriptEngine {
    /// Create an engine whose script sees `argv` as `process.argv`.
    pub fn with_argv(argv: &[String]) -> Result<Self, rquickjs::Error> {
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;
        let exit_code = Rc::new(Cell::new(None));

        let recorded = Rc::clone(&exit_code);
        context.with(|ctx| -> Result<(), rquickjs::Error> {
            let js_argv = Array::new(ctx.clone())?;
            for (i, arg) in argv.iter().enumerate() {
                js_argv.set(i, arg.as_str())?;
            }

            let exit_fn = Function::new(ctx.clone(), move |code: Opt<i32>| {
                recorded.set(Some(code.0.unwrap_or(0)));
            })?;

            let process = Object::new(ctx.clone())?;
            process.set("argv", js_argv)?;
            process.set("exit", exit_fn)?;
            ctx.globals().set("process", process)?;
            Ok(())
        })?;

        Ok(Self {
            runtime,
            context,
            exit_code,
        })
    }

    /// Load and evaluate a script by path. The engine's job ends when the
    /// script returns; it does not interpose on the script's own output.
    pub fn run_script(&self, path: &Path) -> Result<(), EngineError> {
        let source = std::fs::read_to_string(path).map_err(|source| EngineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.context.with(|ctx| match ctx.eval::<(), _>(source) {
            Ok(()) => Ok(()),
            Err(rquickjs::Error::Exception) => {
                Err(EngineError::Script(format!("{:?}", ctx.catch())))
            }
            Err(err) => Err(EngineError::Engine(err)),
        })
    }

    /// Exit code reported by the script via `process.exit`, or 0.
    pub fn exit_code(&self) -> i32 {
        self.exit_code.get().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_source(argv: &[&str], source: &str) -> (ScriptEngine, Result<(), EngineError>) {
        let argv: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
        let engine = ScriptEngine::with_argv(&argv).unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("script.js");
        std::fs::write(&script, source).unwrap();
        let result = engine.run_script(&script);
        (engine, result)
    }

    #[test]
    fn test_argv_visible_in_order() {
        let (engine, result) = run_source(
            &["", "", "a.ts", "b.ts", "--outDir"],
            r#"
            var ok = process.argv.length === 5
                && process.argv[0] === ""
                && process.argv[2] === "a.ts"
                && process.argv[3] === "b.ts"
                && process.argv[4] === "--outDir";
            process.exit(ok ? 7 : 13);
            "#,
        );
        result.unwrap();
        assert_eq!(engine.exit_code(), 7);
    }

    #[test]
    fn test_exit_defaults_to_zero() {
        let (engine, result) = run_source(&["", ""], "var x = 1 + 1;");
        result.unwrap();
        assert_eq!(engine.exit_code(), 0);
    }

    #[test]
    fn test_exit_without_code_is_zero() {
        let (engine, result) = run_source(&["", ""], "process.exit();");
        result.unwrap();
        assert_eq!(engine.exit_code(), 0);
    }

    #[test]
    fn test_thrown_error_is_script_failure() {
        let (_, result) = run_source(&["", ""], "throw new Error('boom');");
        assert!(matches!(result, Err(EngineError::Script(_))));
    }

    #[test]
    fn test_missing_script_is_read_failure() {
        let engine = ScriptEngine::with_argv(&[]).unwrap();
        let result = engine.run_script(Path::new("/definitely/not/here.js"));
        assert!(matches!(result, Err(EngineError::Read { .. })));
    }
}
