use crate::types::VideoMetadata;

/// Instruction asking for a ten-point summary as one JSON object.
pub fn summary_prompt(video: &VideoMetadata) -> String {
    format!(
        r#"Create a comprehensive educational summary of this YouTube video:

Title: {title}
Channel: {channel}
Description: {description}

Format your response as a valid JSON object with this exact structure:
{{
  "title": "Main topic of the video",
  "points": [
    {{
      "heading": "Key point as a clear heading",
      "description": "Detailed explanation with examples and key takeaways",
      "resources": [
        {{
          "title": "Resource name",
          "url": "URL to learn more",
          "type": "article|video|course"
        }}
      ]
    }}
  ]
}}

Guidelines:
- Include exactly 10 main points covering all aspects of the video
- Each description should be 4-5 paragraphs with clear examples
- Include 2-3 relevant learning resources per point
- The "type" of each resource must be one of: article, video, course
- Resources should be from reputable educational sites
- Focus on practical understanding and applications
- Make sure points flow logically from basic to advanced concepts
- Output ONLY the JSON object, nothing else"#,
        title = video.title,
        channel = video.channel_title,
        description = video.description,
    )
}

/// Instruction asking for ten four-option questions as one JSON array.
pub fn quiz_prompt(video: &VideoMetadata) -> String {
    format!(
        r#"Create an educational quiz based on this YouTube video:

Title: {title}
Channel: {channel}
Description: {description}

Create 10 multiple-choice questions that test understanding of the key concepts.
Format your response as a valid JSON array exactly like this example:
[
  {{
    "id": 1,
    "text": "Question text here?",
    "options": ["Option 1", "Option 2", "Option 3", "Option 4"],
    "correctAnswer": 0
  }}
]

Guidelines:
- Create exactly 10 questions, numbered with "id" from 1 to 10
- Each question should have exactly 4 options
- Make questions progressively more challenging
- Include a mix of concept understanding and application questions
- Ensure correctAnswer is the index (0-3) of the correct option
- Make all options plausible but only one correct
- Do not include any additional text or formatting in the response"#,
        title = video.title,
        channel = video.channel_title,
        description = video.description,
    )
}
