use api_shared::dto::{
    CreateTestimonialReq, ErrorRes, HealthRes, ListTestimonialsRes, SetApprovalReq,
    SubmitFeedbackReq, SubmitFeedbackRes, SuccessRes, Testimonial,
};
use clap::{Parser, Subcommand};
use reqwest::blocking::{Client, Response};

#[derive(Parser)]
#[command(name = "plaudit")]
#[command(about = "plaudit testimonial service admin CLI")]
struct Cli {
    /// Base URL of the REST API
    #[arg(long, default_value = "http://127.0.0.1:3000", env = "PLAUDIT_API_URL")]
    url: String,
    /// API key for moderation commands
    #[arg(long, env = "PLAUDIT_API_KEY")]
    api_key: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// List testimonials
    List {
        /// Show only approved testimonials (public view, no key needed)
        #[arg(long)]
        approved: bool,
    },
    /// Create a testimonial record
    Add {
        name: String,
        title: String,
        feedback: String,
        rating: u8,
    },
    /// Approve a testimonial for public display
    Approve {
        /// Testimonial id
        id: String,
    },
    /// Unapprove a testimonial
    Reject {
        /// Testimonial id
        id: String,
    },
    /// Delete a testimonial
    Delete {
        /// Testimonial id
        id: String,
    },
    /// Send a feedback submission through the intake endpoint
    Submit {
        name: String,
        email: String,
        title: String,
        feedback: String,
        rating: u8,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::Health => {
            let res: HealthRes = check(client.get(format!("{}/health", cli.url)).send()?)?.json()?;
            println!("{}: {}", if res.ok { "ok" } else { "not ok" }, res.message);
        }
        Commands::List { approved } => {
            let res: ListTestimonialsRes = if approved {
                check(
                    client
                        .get(format!("{}/testimonials/approved", cli.url))
                        .send()?,
                )?
                .json()?
            } else {
                check(
                    client
                        .get(format!("{}/testimonials", cli.url))
                        .header("x-api-key", require_key(&cli.api_key)?)
                        .send()?,
                )?
                .json()?
            };

            if res.testimonials.is_empty() {
                println!("No testimonials found.");
            } else {
                for testimonial in res.testimonials {
                    print_testimonial(&testimonial);
                }
            }
        }
        Commands::Add {
            name,
            title,
            feedback,
            rating,
        } => {
            let testimonial: Testimonial = check(
                client
                    .post(format!("{}/testimonials", cli.url))
                    .header("x-api-key", require_key(&cli.api_key)?)
                    .json(&CreateTestimonialReq {
                        name,
                        title,
                        feedback,
                        rating,
                    })
                    .send()?,
            )?
            .json()?;
            println!("Created:");
            print_testimonial(&testimonial);
        }
        Commands::Approve { ref id } => {
            set_approval(&client, &cli, id, true)?;
            println!("Approved {id}");
        }
        Commands::Reject { ref id } => {
            set_approval(&client, &cli, id, false)?;
            println!("Unapproved {id}");
        }
        Commands::Delete { id } => {
            let res: SuccessRes = check(
                client
                    .delete(format!("{}/testimonials/{}", cli.url, id))
                    .header("x-api-key", require_key(&cli.api_key)?)
                    .send()?,
            )?
            .json()?;
            if res.success {
                println!("Deleted {id}");
            }
        }
        Commands::Submit {
            name,
            email,
            title,
            feedback,
            rating,
        } => {
            let res: SubmitFeedbackRes = check(
                client
                    .post(format!("{}/feedback", cli.url))
                    .json(&SubmitFeedbackReq {
                        name,
                        email,
                        title,
                        feedback,
                        rating,
                    })
                    .send()?,
            )?
            .json()?;
            println!("{}", res.message);
        }
    }

    Ok(())
}

fn set_approval(
    client: &Client,
    cli: &Cli,
    id: &str,
    approved: bool,
) -> Result<SuccessRes, Box<dyn std::error::Error>> {
    let res = check(
        client
            .put(format!("{}/testimonials/{}/approval", cli.url, id))
            .header("x-api-key", require_key(&cli.api_key)?)
            .json(&SetApprovalReq { approved })
            .send()?,
    )?
    .json()?;
    Ok(res)
}

fn require_key(api_key: &Option<String>) -> Result<&str, Box<dyn std::error::Error>> {
    api_key
        .as_deref()
        .ok_or_else(|| "an API key is required (--api-key or PLAUDIT_API_KEY)".into())
}

fn check(response: Response) -> Result<Response, Box<dyn std::error::Error>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error = response
        .json::<ErrorRes>()
        .map(|body| body.error)
        .unwrap_or_else(|_| "unknown error".into());
    Err(format!("request failed ({status}): {error}").into())
}

fn print_testimonial(testimonial: &Testimonial) {
    println!(
        "ID: {}, Name: {}, Title: {}, Rating: {}/5, Approved: {}, Created: {}",
        testimonial.id,
        testimonial.name,
        testimonial.title,
        testimonial.rating,
        testimonial.approved,
        testimonial.created_at
    );
    println!("  {}", testimonial.feedback);
}
