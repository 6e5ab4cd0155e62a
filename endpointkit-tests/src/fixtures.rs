mod multipart;
