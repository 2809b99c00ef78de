use clap::Parser;
use generis::{
    BoxBuilder, Catalog, DeclarationLookup, DefaultObjectFactory, Error, Fallback, ObjectFactory,
    ResolveError, ResolveOptions, Resolver, TyDisplay, TypeView, parse_type, render_error,
};
use miette::{IntoDiagnostic, Result, WrapErr, miette};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    ExampleHighlighter, IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use std::io::BufRead;
use std::io::BufReader;
use std::path::PathBuf;

mod query;

use query::{Member, MemberKind, QueryError, parse_member, split_line};

/// Generis - resolve generic member types through subtypes
#[derive(Parser, Debug)]
#[command(name = "generis")]
#[command(about = "Resolve the effective types of generic members", long_about = None)]
struct Args {
    /// Catalog file to load (repeatable)
    #[arg(long = "catalog", value_name = "FILE")]
    catalogs: Vec<PathBuf>,

    /// Start from an empty catalog instead of the built-in prelude
    #[arg(long)]
    no_prelude: bool,

    /// Fail on unresolvable type variables instead of using the top type
    #[arg(long)]
    strict: bool,

    /// Substitute the viewing type's arguments through intermediate supertypes
    #[arg(long)]
    translate_inherited: bool,

    /// Instantiate every resolved type with the default object factory
    #[arg(long)]
    create: bool,

    /// Viewing type, e.g. `ArrayList<String>` (if not provided, reads queries from stdin)
    viewing: Option<String>,

    /// Member to resolve: `field`, `method()` for its return type or
    /// `method(..)` for its parameter types, optionally prefixed by `Type.`
    member: Option<String>,
}

impl Args {
    fn options(&self) -> ResolveOptions {
        let fallback = if self.strict {
            Fallback::Error
        } else {
            Fallback::TopType
        };
        ResolveOptions::default()
            .with_fallback(fallback)
            .with_translate_inherited(self.translate_inherited)
    }
}

#[derive(Debug, thiserror::Error)]
enum QueryFailure {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Generis(#[from] Error),
}

type View = <BoxBuilder as generis::TypeBuilder>::TypeView;

/// A loaded catalog and the settings queries run with.
struct Session {
    catalog: Catalog<BoxBuilder>,
    options: ResolveOptions,
    create: bool,
}

impl Session {
    fn load(args: &Args) -> Result<Self> {
        let builder = BoxBuilder::new();
        let mut catalog = if args.no_prelude {
            Catalog::new(builder)
        } else {
            Catalog::with_prelude(builder).into_diagnostic()?
        };

        for path in &args.catalogs {
            let source = std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("cannot read catalog {}", path.display()))?;
            match catalog.load(&source) {
                Ok(count) => tracing::info!(path = %path.display(), count, "loaded catalog"),
                Err(e) => {
                    render_error(&e.into(), &source);
                    return Err(miette!("failed to load catalog {}", path.display()));
                }
            }
        }

        Ok(Self {
            catalog,
            options: args.options(),
            create: args.create,
        })
    }

    /// Words offered by the REPL completer: type names and member names.
    fn words(&self) -> Vec<String> {
        let mut words = Vec::new();
        for decl in self.catalog.iter() {
            words.push(decl.name.to_string());
            words.extend(decl.fields.iter().map(|field| field.name.to_string()));
            words.extend(decl.methods.iter().map(|method| format!("{}()", method.name)));
        }
        words.sort();
        words.dedup();
        words
    }

    /// Resolve `member` through `viewing`, one output line per resolved type.
    fn query(&self, viewing: &str, member: &str) -> Result<Vec<String>, QueryFailure> {
        let member = parse_member(member)?;
        let builder = self.catalog.builder();
        let viewing_ty = parse_type(builder, viewing).map_err(Error::from)?;
        let owner = match member.owner {
            Some(owner) => owner,
            None => viewing_ty
                .raw_name(builder)
                .ok_or_else(|| QueryError::NoOwner(viewing.to_string()))?,
        };

        let types = self.resolve(&viewing_ty, owner, &member)?;
        types.iter().map(|ty| self.describe(ty)).collect()
    }

    fn resolve(
        &self,
        viewing: &View,
        owner: &str,
        member: &Member<'_>,
    ) -> Result<Vec<View>, QueryFailure> {
        let resolver: Resolver<'_, BoxBuilder, Catalog<BoxBuilder>> =
            Resolver::with_options(&self.catalog, self.options.clone());
        let unknown_owner = || {
            Error::from(ResolveError::UnknownType {
                name: owner.to_string(),
            })
        };
        if !self.catalog.contains(owner) {
            return Err(unknown_owner().into());
        }

        let resolved = match member.kind {
            MemberKind::Field => {
                let field = self.catalog.find_field(owner, member.name).ok_or_else(|| {
                    QueryError::NoSuchField {
                        owner: owner.to_string(),
                        name: member.name.to_string(),
                    }
                })?;
                resolver.resolve_field_type(field, viewing).map(|ty| vec![ty])
            }
            MemberKind::ReturnType | MemberKind::ParamTypes => {
                let method = self.catalog.find_method(owner, member.name).ok_or_else(|| {
                    QueryError::NoSuchMethod {
                        owner: owner.to_string(),
                        name: member.name.to_string(),
                    }
                })?;
                if member.kind == MemberKind::ReturnType {
                    resolver.resolve_return_type(method, viewing).map(|ty| vec![ty])
                } else {
                    resolver.resolve_param_types(method, viewing)
                }
            }
        };
        resolved.map_err(|e| Error::from(e).into())
    }

    fn describe(&self, ty: &View) -> Result<String, QueryFailure> {
        let builder = self.catalog.builder();
        let shown = ty.display(builder).to_string();
        if !self.create {
            return Ok(shown);
        }
        let factory = DefaultObjectFactory::new(&self.catalog);
        let instance = factory.create(ty).map_err(Error::from)?;
        Ok(format!("{shown} = {instance}"))
    }
}

/// Run one query, printing its result or rendering its error.
///
/// Returns whether the query succeeded.
fn interpret_input(session: &Session, viewing: &str, member: &str) -> bool {
    match session.query(viewing, member) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            true
        }
        Err(QueryFailure::Generis(e)) => {
            // Only a malformed viewing type carries a span.
            render_error(&e, viewing);
            false
        }
        Err(QueryFailure::Query(e)) => {
            eprintln!("Error: {e}");
            false
        }
    }
}

fn interpret_line(session: &Session, line: &str) {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") {
        return;
    }
    match split_line(line) {
        Ok((viewing, member)) => {
            interpret_input(session, viewing, member);
        }
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline(words: Vec<String>) -> (Reedline, DefaultPrompt) {
    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&['_', '.', '(', ')']);
        completions.insert(words.clone());
        completions
    });

    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(ExampleHighlighter::new(words)))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(Box::new(ide_menu)))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("generis".to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

fn main() -> Result<()> {
    let args = Args::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    // GENERIS_LOG controls the log level, WARN when unset.
    let filter = EnvFilter::try_from_env("GENERIS_LOG")
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let session = Session::load(&args)?;

    match (&args.viewing, &args.member) {
        (Some(viewing), Some(member)) => {
            if !interpret_input(&session, viewing, member) {
                std::process::exit(1);
            }
            return Ok(());
        }
        (Some(_), None) => return Err(miette!("missing member to resolve")),
        (None, _) => {}
    }

    if atty::is(atty::Stream::Stdin) {
        let (mut line_editor, prompt) = setup_reedline(session.words());

        println!("Generis - enter `<viewing type> <member>` (Ctrl+D or Ctrl+C to exit)");

        loop {
            let sig = match line_editor.read_line(&prompt) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Reedline error: {e}");
                    return Ok(());
                }
            };

            match sig {
                Signal::Success(buffer) => interpret_line(&session, &buffer),
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    } else {
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line
                .into_diagnostic()
                .wrap_err("cannot read query from stdin")?;
            interpret_line(&session, &line);
        }
    }

    Ok(())
}
