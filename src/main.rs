use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;

use classrank::classrank_config::AppConfig;
use classrank::classrank_core::RecordError;
use classrank::classrank_models::{
    AddSubjectDto, ChangePasswordDto, CreateClassDto, EnrollStudentDto, Mark, RegisterFacultyDto,
    Role,
};
use classrank::classrank_observability::init_logging;
use classrank::cli::seeder::{SeedCounts, seed_records};
use classrank::cli::{
    login_faculty, login_student, password_or_prompt, read_new_password, render_leaderboard,
    render_report_card, report_save, value_or_prompt,
};
use classrank::modules::{
    AuthService, ClassService, ExportService, FacultyService, MarkService, RankingService,
    StudentService,
};
use classrank::state::{AppState, init_app_state};

#[derive(Parser)]
#[command(name = "classrank")]
#[command(about = "Classrank - classes, marks and ranked leaderboards", long_about = None)]
struct Cli {
    /// JSON data file (overrides CLASSRANK_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Faculty credentials; anything missing is prompted for.
#[derive(Args)]
struct FacultyLogin {
    /// Faculty username
    #[arg(short = 'u', long)]
    username: Option<String>,

    /// Password (will be prompted securely if not provided)
    #[arg(short = 'p', long)]
    password: Option<String>,
}

/// Student credentials; anything missing is prompted for.
#[derive(Args)]
struct StudentLogin {
    /// Student ID, e.g. STU_7_K3QZ
    #[arg(short = 's', long)]
    student: Option<String>,

    /// Password (will be prompted securely if not provided)
    #[arg(short = 'p', long)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new faculty account
    RegisterFaculty {
        /// Username used to log in
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create a class such as 10A
    CreateClass {
        #[command(flatten)]
        login: FacultyLogin,

        /// Class name: digits followed by one letter
        name: String,
    },
    /// Add a subject to one of your classes
    AddSubject {
        #[command(flatten)]
        login: FacultyLogin,

        /// Class id or name
        #[arg(short = 'c', long)]
        class: String,

        subject: String,
    },
    /// Enroll a student and print their temporary password
    Enroll {
        #[command(flatten)]
        login: FacultyLogin,

        /// Class id or name
        #[arg(short = 'c', long)]
        class: String,

        /// Roll number, digits only
        #[arg(short = 'r', long)]
        roll: String,

        /// Student name
        #[arg(short = 'n', long)]
        name: String,
    },
    /// Record a student's mark in a subject
    SetMark {
        #[command(flatten)]
        login: FacultyLogin,

        /// Student ID
        #[arg(short = 's', long)]
        student: String,

        /// Subject name, as offered by the class
        #[arg(long)]
        subject: String,

        mark: String,
    },
    /// List your classes
    Classes {
        #[command(flatten)]
        login: FacultyLogin,
    },
    /// Show the ranked leaderboard for a class
    Leaderboard {
        #[command(flatten)]
        login: FacultyLogin,

        /// Class id or name
        #[arg(short = 'c', long)]
        class: String,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a class leaderboard as CSV
    Export {
        #[command(flatten)]
        login: FacultyLogin,

        /// Class id or name
        #[arg(short = 'c', long)]
        class: String,

        /// Output file (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Show your marks and rank
    Report {
        #[command(flatten)]
        login: StudentLogin,

        /// Print the report card as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change your student password
    ChangePassword {
        #[command(flatten)]
        login: StudentLogin,
    },
    /// Fill the data file with fake faculty, classes and students
    Seed {
        /// Number of faculty accounts to create
        #[arg(short = 'f', long, default_value = "2")]
        faculties: usize,

        /// Classes per faculty
        #[arg(long, default_value = "2")]
        classes: usize,

        /// Students per class
        #[arg(long, default_value = "10")]
        students: usize,
    },
}

fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("⚠️  Logging disabled: {}", e);
    }

    let store_config = match cli.data_file {
        Some(path) => config.store.with_data_file(path),
        None => config.store,
    };
    let mut state = init_app_state(&store_config);

    if let Err(e) = run(&mut state, cli.command) {
        match e.downcast_ref::<RecordError>() {
            Some(record) => eprintln!("\n❌ {} [{}]", record, record.code()),
            None => eprintln!("\n❌ {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(state: &mut AppState, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::RegisterFaculty {
            username,
            name,
            password,
        } => handle_register_faculty(state, username, name, password),
        Commands::CreateClass { login, name } => {
            let session = login_faculty(state, login.username, login.password)?;
            let committed =
                ClassService::create_class(state, &session, CreateClassDto::new(name))?;
            report_save(&committed.save);
            println!("✅ Class created: {}", committed.value);
            Ok(())
        }
        Commands::AddSubject {
            login,
            class,
            subject,
        } => {
            let session = login_faculty(state, login.username, login.password)?;
            let (class_id, _) = ClassService::resolve_class(state.snapshot(), &session, &class)?;
            let class_id = class_id.clone();
            let committed = ClassService::add_subject(
                state,
                &session,
                class_id.as_str(),
                AddSubjectDto::new(subject),
            )?;
            report_save(&committed.save);
            println!("✅ Subject added");
            Ok(())
        }
        Commands::Enroll {
            login,
            class,
            roll,
            name,
        } => {
            let session = login_faculty(state, login.username, login.password)?;
            let (class_id, _) = ClassService::resolve_class(state.snapshot(), &session, &class)?;
            let class_id = class_id.clone();
            let committed = StudentService::enroll_student(
                state,
                &session,
                class_id.as_str(),
                EnrollStudentDto::new(roll, name),
            )?;
            report_save(&committed.save);
            println!("\n✅ Student enrolled!");
            println!("   Student ID: {}", committed.value.id);
            println!("   Temporary password: {}", committed.value.temporary_password);
            Ok(())
        }
        Commands::SetMark {
            login,
            student,
            subject,
            mark,
        } => {
            let session = login_faculty(state, login.username, login.password)?;
            let mark: Mark = mark.parse()?;
            let committed = MarkService::set_mark(
                state,
                &session,
                student.trim(),
                subject.trim(),
                i64::from(mark.value()),
            )?;
            report_save(&committed.save);
            println!("✅ Mark recorded");
            Ok(())
        }
        Commands::Classes { login } => {
            let session = login_faculty(state, login.username, login.password)?;
            let classes = ClassService::classes_for_faculty(state.snapshot(), &session)?;
            if classes.is_empty() {
                println!("No classes yet");
            }
            for (class_id, class) in classes {
                println!(
                    "{}  {}  ({} students; subjects: {})",
                    class.name,
                    class_id,
                    class.students.len(),
                    class.subjects.join(", ")
                );
            }
            Ok(())
        }
        Commands::Leaderboard { login, class, json } => {
            let session = login_faculty(state, login.username, login.password)?;
            let (_, found) = ClassService::resolve_class(state.snapshot(), &session, &class)?;
            let rows = RankingService::leaderboard(state.snapshot(), &session, &class)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("Class {}", found.name);
                print!("{}", render_leaderboard(&found.subjects, &rows));
            }
            Ok(())
        }
        Commands::Export {
            login,
            class,
            output,
        } => {
            let session = login_faculty(state, login.username, login.password)?;
            let csv = ExportService::export_class(state.snapshot(), &session, &class)?.to_csv();
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✅ Exported to {}", path.display());
                }
                None => print!("{}", csv),
            }
            Ok(())
        }
        Commands::Report { login, json } => {
            let session = login_student(state, login.student, login.password)?;
            let card = StudentService::report_card(state.snapshot(), &session, session.key())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&card)?);
            } else {
                print!("{}", render_report_card(&card));
            }
            Ok(())
        }
        Commands::ChangePassword { login } => {
            let student_id = value_or_prompt(login.student, "Student ID")?;
            let password = password_or_prompt(login.password, "Current password")?;
            let outcome =
                AuthService::authenticate(state.snapshot(), Role::Student, &student_id, &password)?;
            let new_password = read_new_password()?;
            let committed = AuthService::change_password(
                state,
                &outcome.session,
                outcome.session.key(),
                ChangePasswordDto::new(new_password),
            )?;
            report_save(&committed.save);
            println!("✅ Password changed");
            Ok(())
        }
        Commands::Seed {
            faculties,
            classes,
            students,
        } => {
            let counts = SeedCounts {
                faculties,
                classes_per_faculty: classes,
                students_per_class: students,
            };
            let report = seed_records(state, &counts)?;
            if let Some(save) = &report.save {
                report_save(save);
            }
            println!("🌱 Seeded {}", state.store_location());
            for (username, password) in &report.faculties {
                println!("   Faculty: {} / {}", username, password);
            }
            println!(
                "   {} classes, {} students",
                report.classes,
                report.students.len()
            );
            Ok(())
        }
    }
}

fn handle_register_faculty(
    state: &mut AppState,
    username: Option<String>,
    name: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = value_or_prompt(username, "Username")?;
    let name = value_or_prompt(name, "Full name")?;
    let password = match password {
        Some(password) => password,
        None => read_new_password()?,
    };

    let committed = FacultyService::register_faculty(
        state,
        RegisterFacultyDto::new(username, name.clone(), password),
    )?;
    report_save(&committed.save);

    println!("\n✅ Faculty registered successfully!");
    println!("   Username: {}", committed.value);
    println!("   Name: {}", name.trim());
    Ok(())
}
