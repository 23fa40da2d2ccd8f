mod bfs;
