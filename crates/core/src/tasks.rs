//! Consistent task label colors for terminal output

use colored::*;

/// Get a consistent color for a task name
pub fn get_task_color(task_name: &str) -> Color {
    // Use a simple hash of the task name bytes for consistent colors
    let hash = task_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

    // Cohesive color palette: vibrant jewel tones that are clearly "label" colors
    // Avoiding conventional log colors (red/yellow/green/blue) while maintaining readability
    let colors = [
        Color::TrueColor {
            r: 147,
            g: 112,
            b: 219,
        }, // Medium slate blue - professional purple
        Color::TrueColor {
            r: 64,
            g: 224,
            b: 208,
        }, // Turquoise - vibrant teal
        Color::TrueColor {
            r: 255,
            g: 140,
            b: 0,
        }, // Dark orange - warm accent
        Color::TrueColor {
            r: 199,
            g: 21,
            b: 133,
        }, // Medium violet red - deep pink
        Color::TrueColor {
            r: 72,
            g: 209,
            b: 204,
        }, // Medium turquoise - aqua
        Color::TrueColor {
            r: 138,
            g: 43,
            b: 226,
        }, // Blue violet - rich purple
    ];

    colors[(hash % colors.len() as u64) as usize]
}
