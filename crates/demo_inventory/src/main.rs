#![forbid(unsafe_code)]

//! # Demo Inventory
//!
//! Interactive "Add/Edit Product" form for a small inventory service,
//! built on the `intake` form engine.
//!
//! The flow mirrors a typical admin page: the form mounts with defaults,
//! option lists and (in edit mode) the product record arrive afterwards and
//! hydrate the mounted form, and a successful submission hands the validated
//! record to a save handler. The record is printed as JSON on exit, standing
//! in for the REST payload a real page would send.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p demo_inventory          # add a new product
//! cargo run -p demo_inventory -- --edit  # edit an existing one
//! ```

use std::io::{self, Write};
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, execute, terminal};
use intake::{
    theme_plain, FieldSchema, Form, FormValues, KeyOutcome, Schema, SelectOption,
};

const HELP: &str = "enter: next • shift+tab: back • ctrl+s: submit • esc: quit";

#[derive(Parser)]
#[command(name = "demo_inventory", about = "Inventory product form demo")]
struct Args {
    /// Edit an existing product instead of adding a new one.
    #[arg(long)]
    edit: bool,

    /// Disable colors.
    #[arg(long)]
    plain: bool,
}

fn product_schema() -> anyhow::Result<Schema> {
    let schema = Schema::new(vec![
        FieldSchema::text("name").label("Product Name").required(true),
        FieldSchema::text_area("description")
            .label("Description")
            .placeholder("Optional details"),
        FieldSchema::text("sku").label("SKU").required(true),
        FieldSchema::number("price").label("Price").required(true).min(0.0),
        FieldSchema::number("stockQuantity")
            .label("Stock Quantity")
            .required(true)
            .min(0.0),
        FieldSchema::number("lowStockThreshold")
            .label("Low Stock Threshold")
            .required(true)
            .min(0.0),
        FieldSchema::select("uomId")
            .label("Unit of Measurement")
            .required(true),
        FieldSchema::select("categoryId").label("Category").required(true),
        FieldSchema::file("imageFile")
            .label("Image")
            .placeholder("path/to/image.png"),
        FieldSchema::checkbox("active").label("Active"),
    ])?;
    Ok(schema)
}

/// Stand-in for `GET /categories`.
async fn fetch_categories() -> Vec<SelectOption> {
    tokio::time::sleep(Duration::from_millis(150)).await;
    vec![
        SelectOption::new("Beverages", "1"),
        SelectOption::new("Snacks", "2"),
        SelectOption::new("Produce", "3"),
        SelectOption::new("Household", "4"),
    ]
}

/// Stand-in for `GET /units-of-measurement`.
async fn fetch_units() -> Vec<SelectOption> {
    tokio::time::sleep(Duration::from_millis(150)).await;
    vec![
        SelectOption::new("Piece", "1"),
        SelectOption::new("Kilogram", "2"),
        SelectOption::new("Litre", "3"),
        SelectOption::new("Box", "4"),
    ]
}

/// Stand-in for `GET /products/{id}`.
async fn fetch_product(id: &str) -> FormValues {
    tokio::time::sleep(Duration::from_millis(200)).await;
    FormValues::new()
        .with("id", id)
        .with("name", "Yerba Mate 500g")
        .with("description", "Loose-leaf, air dried.")
        .with("sku", "YM-500")
        .with("price", 7.5)
        .with("stockQuantity", 120.0)
        .with("lowStockThreshold", 10.0)
        .with("uomId", "1")
        .with("categoryId", "1")
        .with("active", true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let defaults = FormValues::new()
        .with("name", "")
        .with("price", 0.0)
        .with("stockQuantity", 0.0)
        .with("lowStockThreshold", 0.0);

    let (tx, rx) = mpsc::channel::<FormValues>();
    let created = tx.clone();
    let updated = tx;

    let mut form = Form::new(product_schema()?, defaults)
        .edit(args.edit)
        .submit_label(if args.edit { "Save Changes" } else { "Add Product" })
        .on_submit(move |record| {
            let tx = created.clone();
            Box::pin(async move {
                // Pretend to POST to the inventory service.
                tokio::time::sleep(Duration::from_millis(400)).await;
                let _ = tx.send(record);
                Ok(())
            })
        })
        .on_submit_edit(move |record| {
            let tx = updated.clone();
            Box::pin(async move {
                // Pretend to PUT to the inventory service.
                tokio::time::sleep(Duration::from_millis(400)).await;
                let _ = tx.send(record);
                Ok(())
            })
        });
    if args.plain {
        form = form.theme(theme_plain());
    }

    // Option lists arrive after the form is mounted, exactly like the admin
    // page's category fetch. Already-hydrated values survive this.
    form.set_options("categoryId", fetch_categories().await);
    form.set_options("uomId", fetch_units().await);

    if args.edit {
        let record = fetch_product("42").await;
        form.hydrate(&record);
    }

    terminal::enable_raw_mode()?;
    let saved = run(&mut form).await;
    terminal::disable_raw_mode()?;

    if saved? {
        match rx.try_recv() {
            Ok(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            Err(_) => println!("No record received from the save handler."),
        }
    } else {
        println!("Cancelled, nothing saved.");
    }
    Ok(())
}

async fn run(form: &mut Form) -> anyhow::Result<bool> {
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    let result = drive(form, &mut stdout).await;
    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    result
}

/// Event loop: render, route keys, submit on request.
///
/// Returns `true` when a submission went through, `false` on abort.
async fn drive(form: &mut Form, stdout: &mut io::Stdout) -> anyhow::Result<bool> {
    let mut last_error = None;
    loop {
        draw(form, stdout, last_error.as_deref())?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match form.handle_key(key) {
            KeyOutcome::Aborted => return Ok(false),
            KeyOutcome::SubmitRequested => {
                last_error = None;
                match form.begin_submit()? {
                    Some(job) => {
                        // Show the disabled submit control while the save runs.
                        draw(form, stdout, None)?;
                        let result = job.run().await;
                        form.finish_submit(&result);
                        match result {
                            Ok(()) => return Ok(true),
                            // The engine leaves the entered values intact;
                            // surface the failure and let the user retry.
                            Err(error) => last_error = Some(format!("save failed: {error}")),
                        }
                    }
                    // Validation errors render inline on the next frame.
                    None => {}
                }
            }
            KeyOutcome::Handled | KeyOutcome::Ignored => {}
        }
    }
}

fn draw(form: &Form, stdout: &mut io::Stdout, error: Option<&str>) -> anyhow::Result<()> {
    execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    // Raw mode needs explicit carriage returns.
    let view = form.view().replace('\n', "\r\n");
    write!(stdout, "{view}\r\n\r\n{HELP}\r\n")?;
    if let Some(error) = error {
        write!(stdout, "\r\n{error}\r\n")?;
    }
    stdout.flush()?;
    Ok(())
}
