use std::io::Read;

use structopt::StructOpt;

use formpost::config;
use formpost::form::FormFields;
use formpost::state::FormState;
use formpost::SubmissionController;

mod indicator;

// Sysexits-style codes for shell callers
const DATAERR: i32 = 65;
const UNAVAILABLE: i32 = 69;

#[derive(Debug, StructOpt)]
#[structopt(name = "formpost", about = "Submit a contact form to the mail endpoint.")]
struct Opt {
    #[structopt(short, long)]
    name: Option<String>,

    #[structopt(short, long)]
    email: Option<String>,

    #[structopt(short, long)]
    subject: Option<String>,

    /// Message body; read from stdin when omitted
    #[structopt(short, long)]
    message: Option<String>,

    /// Read all fields as a JSON object from stdin instead of flags
    #[structopt(long)]
    json: bool,

    /// Config file path (defaults to /etc/formpost/formpost.toml)
    #[structopt(short, long)]
    config: Option<String>,
}

fn read_stdin() -> String {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .expect("Failed to read from stdin!");
    buf
}

fn gather_fields(opt: &Opt) -> FormFields {
    if opt.json {
        serde_json::from_str(&read_stdin()).expect("Invalid JSON form input!")
    } else {
        FormFields {
            name: opt.name.clone().unwrap_or_default(),
            email: opt.email.clone().unwrap_or_default(),
            subject: opt.subject.clone().unwrap_or_default(),
            message: match &opt.message {
                Some(m) => m.clone(),
                None => read_stdin(),
            },
        }
    }
}

#[tokio::main]
async fn main() {
    // Init logger
    env_logger::builder().format_timestamp_micros().init();

    let opt = Opt::from_args();
    let fields = gather_fields(&opt);

    let config = config::load_config(opt.config.as_deref());
    let controller = SubmissionController::new(config);

    let mut state = FormState::new();
    state.on_submit();
    indicator::show_loading();

    let code = match controller.submit(fields).await {
        Ok(outcome) => {
            state.on_outcome(&outcome);

            if let FormState::Failed(ref msg) = state {
                indicator::show_error(msg);
                UNAVAILABLE
            } else {
                indicator::show_sent(outcome.message.as_deref());
                0
            }
        }
        Err(e) => {
            state.on_error(&e);
            indicator::show_error(&e.to_string());

            match e {
                formpost::Error::MissingField(_) | formpost::Error::InvalidEmail(_) => DATAERR,
                _ => UNAVAILABLE,
            }
        }
    };

    std::process::exit(code);
}
