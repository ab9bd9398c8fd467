//! Sample job description and candidates used by `smartfit demo`.

/// A named sample resume.
#[derive(Debug, Clone, Copy)]
pub struct SampleCandidate {
    pub name: &'static str,
    pub resume: &'static str,
}

pub const JOB_DESCRIPTION: &str = "\
We are looking for an Engineering Manager for a Fintech company. Must have experience with \
Microservices, Python, and AWS. Leadership experience managing teams of 10+ engineers is \
required. Knowledge of Kafka and Event-Driven Architecture is a huge plus.";

pub const CANDIDATES: [SampleCandidate; 4] = [
    SampleCandidate {
        name: "Aman Kishore Agarwal (The Perfect Fit)",
        resume: "Associate Director of Engineering. 10+ years of Exp. Managing 35 engineers. \
                 Built lending platforms using Node.js, MongoDB, and Kafka. AWS Expert.",
    },
    SampleCandidate {
        name: "Rohan (The Junior)",
        resume: "Junior Developer. 2 years experience with React and HTML. Learning Node.js. \
                 Enthusiastic about Fintech.",
    },
    SampleCandidate {
        name: "Sarah (The Python Pivot)",
        resume: "Senior Data Scientist. Expert in Python, PyTorch, and AI. Leading a small \
                 research team. No experience with Microservices or Kafka.",
    },
    SampleCandidate {
        name: "John (The Legacy)",
        resume: "Engineering Manager with 15 years experience. Worked on Monolithic Java \
                 applications. Managed large teams. No Cloud/AWS experience.",
    },
];
