// Prompt fragments for resume tailoring.
// The builder in prompt_builder.rs stitches these together with user input.

/// One-page LaTeX skeleton the model is asked to fill in.
/// Defines page geometry, the `primary` color, section styling and the
/// `\resumeItem` / `\resumeSubheading` macros.
pub const LATEX_TEMPLATE: &str = r"\documentclass[10pt, a4paper]{article}
\usepackage[utf8]{inputenc}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage{xcolor}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage{fontawesome5}
\usepackage{geometry}

\geometry{left=0.4in, top=0.4in, right=0.4in, bottom=0.4in}
\definecolor{primary}{HTML}{003d7a}

\titleformat{\section}{\vspace{-4pt}\scshape\raggedright\large\bfseries\color{primary}}{}{0em}{}[\color{primary}\titlerule \vspace{-5pt}]

\newcommand{\resumeItem}[1]{\item\small{#1 \vspace{-2pt}}}
\newcommand{\resumeSubheading}[4]{
  \vspace{-2pt}\item
    \begin{tabular*}{1.0\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & #2 \\
      \textit{\small#3} & \textit{\small #4} \\
    \end{tabular*}\vspace{-7pt}
}

\begin{document}
% Resume content goes here
\end{document}
";

/// Persona line opening every prompt.
pub const RECRUITER_PERSONA: &str =
    "You are a Senior Technical Recruiter. Create a STUNNING 1-page LaTeX resume.";

/// Hard output rules. Numbered so the model can be pointed at them.
pub const OUTPUT_RULES: &str = "\
1. Output ONLY valid LaTeX code. No markdown code blocks.
2. Ensure the resume fits ON ONE PAGE only.
3. Use the FAANG-style template provided.
4. Highlight competitive programming and internships heavily.
5. Quantify bullets (e.g. \"Improved latency by 30%\").";
