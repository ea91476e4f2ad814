//! the `departments` and `subjects` subcommands - manage the catalog

use clap::{Args, Subcommand};
use color_eyre::eyre::{Context, Result};
use studybuddy_types::DepartmentId;
use studybuddy_workflow::Workflow;

use super::{DbArgs, operator};

/// manage departments
#[derive(Subcommand, Debug)]
pub enum DepartmentsCommand {
    /// create a department
    Create(CreateDepartmentArgs),

    /// list departments
    List(ListArgs),
}

/// manage subjects
#[derive(Subcommand, Debug)]
pub enum SubjectsCommand {
    /// create a subject in a department
    Create(CreateSubjectArgs),

    /// list the subjects of a department, grouped by semester
    List(ListSubjectsArgs),
}

#[derive(Args, Debug)]
pub struct CreateDepartmentArgs {
    #[command(flatten)]
    db: DbArgs,

    /// department name
    name: String,

    #[arg(long)]
    description: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    db: DbArgs,

    /// output format (table, json)
    #[arg(short, long, default_value = "table")]
    output: String,
}

#[derive(Args, Debug)]
pub struct CreateSubjectArgs {
    #[command(flatten)]
    db: DbArgs,

    /// department id
    #[arg(short, long)]
    department: u64,

    /// semester (1-12)
    #[arg(short, long)]
    semester: i32,

    /// subject name
    name: String,
}

#[derive(Args, Debug)]
pub struct ListSubjectsArgs {
    #[command(flatten)]
    db: DbArgs,

    /// department id
    department: u64,

    /// output format (table, json)
    #[arg(short, long, default_value = "table")]
    output: String,
}

impl DepartmentsCommand {
    /// run the departments command
    pub async fn run(self) -> Result<()> {
        match self {
            DepartmentsCommand::Create(args) => create_department(args).await,
            DepartmentsCommand::List(args) => list_departments(args).await,
        }
    }
}

impl SubjectsCommand {
    /// run the subjects command
    pub async fn run(self) -> Result<()> {
        match self {
            SubjectsCommand::Create(args) => create_subject(args).await,
            SubjectsCommand::List(args) => list_subjects(args).await,
        }
    }
}

async fn create_department(args: CreateDepartmentArgs) -> Result<()> {
    let workflow = Workflow::new(args.db.connect().await?);

    let department = workflow
        .create_department(&operator(), &args.name, args.description)
        .await
        .context("failed to create department")?;

    println!("Created department {} '{}'", department.id, department.name);
    Ok(())
}

async fn list_departments(args: ListArgs) -> Result<()> {
    let workflow = Workflow::new(args.db.connect().await?);
    let departments = workflow
        .list_departments()
        .await
        .context("failed to list departments")?;

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&departments)?);
        return Ok(());
    }

    if departments.is_empty() {
        println!("No departments found.");
        return Ok(());
    }

    println!("{:<6} {:<30} DESCRIPTION", "ID", "NAME");
    println!("{}", "-".repeat(70));
    for department in departments {
        println!(
            "{:<6} {:<30} {}",
            department.id.0,
            department.name,
            department.description.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

async fn create_subject(args: CreateSubjectArgs) -> Result<()> {
    let workflow = Workflow::new(args.db.connect().await?);

    let subject = workflow
        .create_subject(
            &operator(),
            DepartmentId(args.department),
            &args.name,
            args.semester,
        )
        .await
        .context("failed to create subject")?;

    println!(
        "Created subject {} '{}' (semester {})",
        subject.id, subject.name, subject.semester
    );
    Ok(())
}

async fn list_subjects(args: ListSubjectsArgs) -> Result<()> {
    let workflow = Workflow::new(args.db.connect().await?);
    let detail = workflow
        .department_detail(DepartmentId(args.department))
        .await
        .context("failed to load department")?;

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!("{}", detail.department.name);
    if detail.semesters.is_empty() {
        println!("  No subjects yet.");
    }
    for (semester, subjects) in &detail.semesters {
        println!("  Semester {}", semester);
        for subject in subjects {
            println!("    {:<6} {}", subject.id.0, subject.name);
        }
    }

    Ok(())
}
